pub mod anthropic;
pub mod proxy;

#[cfg(test)]
mod test_server;

pub use anthropic::AnthropicClient;
pub use proxy::ProxyClient;

/// Page-side access to the proxy: one prompt in, raw model text out
#[async_trait::async_trait]
pub trait PromptClient: Send + Sync {
    async fn call(
        &self,
        prompt: &str,
        system_prompt: &str,
        target_language: &str,
    ) -> Result<String, ProxyError>;
}

/// Server-side access to the language model
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &str, system_prompt: &str) -> Result<String, ModelError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProxyError {
    #[error("Proxy non configuré, mettre à jour LB_PROXY_URL")]
    NotConfigured,

    #[error("network error ({0})")]
    Status(u16),

    /// Error reported by the proxy itself
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        if message.is_empty() {
            ProxyError::Transport("unknown error".to_string())
        } else {
            ProxyError::Transport(message)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Clé API manquante côté serveur")]
    MissingApiKey,

    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}
