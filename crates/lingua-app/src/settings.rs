use lingua_core::languages::{self, DEFAULT_LANGUAGE};
use lingua_core::storage::KeyValueStore;
use tokio::sync::broadcast;

pub const LANGUE_KEY: &str = "langue";

/// Synced settings. Language changes are broadcast to every open page.
pub struct Settings {
    storage: Box<dyn KeyValueStore>,
    fallback: String,
    changes: broadcast::Sender<String>,
}

impl Settings {
    /// `fallback` is the language used until one is picked
    pub fn new(storage: Box<dyn KeyValueStore>, fallback: &str) -> Self {
        let fallback = if languages::is_supported(fallback) {
            fallback.to_string()
        } else {
            tracing::warn!(
                "Default language {} not supported, using {}",
                fallback,
                DEFAULT_LANGUAGE
            );
            DEFAULT_LANGUAGE.to_string()
        };

        let (changes, _) = broadcast::channel(16);
        Self {
            storage,
            fallback,
            changes,
        }
    }

    /// Target language code, the configured default when unset or unreadable
    pub fn language(&self) -> String {
        match self.storage.get(LANGUE_KEY) {
            Ok(Some(code)) if !code.is_empty() => code,
            Ok(_) => self.fallback.clone(),
            Err(e) => {
                tracing::warn!("Failed to read language setting: {}", e);
                self.fallback.clone()
            }
        }
    }

    pub fn set_language(&self, code: &str) -> anyhow::Result<()> {
        if !languages::is_supported(code) {
            anyhow::bail!("Langue non prise en charge: {}", code);
        }

        self.storage.set(LANGUE_KEY, code)?;
        tracing::info!("Target language set to {}", code);

        // No receivers just means no page is open
        let _ = self.changes.send(code.to_string());
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}
