use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lingua_config::Config;
use lingua_core::storage::MemoryStore;
use lingua_core::vocab::VocabStore;
use lingua_io::Clipboard;
use lingua_translator::{PromptClient, ProxyError};
use lingua_types::UiUpdate;

use crate::session::{Effect, Session};
use crate::settings::Settings;
use crate::state::AppState;

mod session_tests;

/// Proxy double: answers by user prompt, optionally after a delay
#[derive(Default)]
pub struct MockClient {
    replies: Mutex<HashMap<String, (Duration, Result<String, ProxyError>)>>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl MockClient {
    pub fn reply(self, prompt: &str, result: Result<String, ProxyError>) -> Self {
        self.reply_after(prompt, Duration::ZERO, result)
    }

    pub fn reply_after(
        self,
        prompt: &str,
        delay: Duration,
        result: Result<String, ProxyError>,
    ) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(prompt.to_string(), (delay, result));
        self
    }
}

#[async_trait::async_trait]
impl PromptClient for MockClient {
    async fn call(
        &self,
        prompt: &str,
        system_prompt: &str,
        target_language: &str,
    ) -> Result<String, ProxyError> {
        self.calls.lock().unwrap().push((
            prompt.to_string(),
            system_prompt.to_string(),
            target_language.to_string(),
        ));

        let reply = self.replies.lock().unwrap().get(prompt).cloned();
        match reply {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(ProxyError::Transport("no reply configured".into())),
        }
    }
}

#[derive(Default)]
pub struct MockClipboard {
    pub fail: bool,
    pub copied: Mutex<Vec<String>>,
}

impl Clipboard for MockClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn memory_vocab() -> Arc<VocabStore> {
    Arc::new(VocabStore::new(Box::new(MemoryStore::new())))
}

pub fn memory_settings() -> Arc<Settings> {
    Arc::new(Settings::new(Box::new(MemoryStore::new()), "en"))
}

pub fn session(lang: &str, hover_tooltip: bool) -> (Session, Arc<VocabStore>, Arc<Settings>) {
    let vocab = memory_vocab();
    let settings = memory_settings();
    let session = Session::new(
        lang.to_string(),
        hover_tooltip,
        vocab.clone(),
        settings.clone(),
    );
    (session, vocab, settings)
}

pub fn app_state(client: MockClient, clipboard: MockClipboard) -> (Arc<AppState>, Arc<MockClient>) {
    let mut config = Config::default();
    config.ui.copy_feedback_ms = 50;

    let client = Arc::new(client);
    let state = AppState::with_parts(
        config,
        VocabStore::new(Box::new(MemoryStore::new())),
        Settings::new(Box::new(MemoryStore::new()), "en"),
        client.clone(),
        Arc::new(clipboard),
    );
    (Arc::new(state), client)
}

/// Markup of a panel or tooltip update
pub fn html(update: &UiUpdate) -> &str {
    match update {
        UiUpdate::Panel { html } | UiUpdate::Tooltip { html, .. } => html,
        other => panic!("expected markup, got {:?}", other),
    }
}

pub fn updates(effects: &[Effect]) -> Vec<&UiUpdate> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Ui(update) => Some(update),
            _ => None,
        })
        .collect()
}
