use std::sync::Arc;

use lingua_config::Config;
use lingua_core::storage::JsonFileStore;
use lingua_core::vocab::VocabStore;
use lingua_io::{Clipboard, SystemClipboard};
use lingua_translator::{PromptClient, ProxyClient};
use tokio::sync::RwLock;

use crate::settings::Settings;

/// Shared by every page session
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub vocab: Arc<VocabStore>,
    pub settings: Arc<Settings>,
    pub client: Arc<dyn PromptClient>,
    pub clipboard: Arc<dyn Clipboard>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let vocab = VocabStore::with_capacity(
            Box::new(JsonFileStore::new(config.storage.local_path())),
            config.storage.vocab_max,
        );
        let settings = Settings::new(
            Box::new(JsonFileStore::new(config.storage.sync_path())),
            &config.client.default_language,
        );

        let client = ProxyClient::from_config(&config.client);
        if !client.is_configured() {
            tracing::warn!("Proxy URL not configured, set LB_PROXY_URL");
        }

        Self::with_parts(
            config,
            vocab,
            settings,
            Arc::new(client),
            Arc::new(SystemClipboard),
        )
    }

    pub fn with_parts(
        config: Config,
        vocab: VocabStore,
        settings: Settings,
        client: Arc<dyn PromptClient>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            vocab: Arc::new(vocab),
            settings: Arc::new(settings),
            client,
            clipboard,
        }
    }
}
