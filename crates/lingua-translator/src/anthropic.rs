use async_trait::async_trait;
use lingua_config::proxy::ProxyConfig;
use serde::{Deserialize, Serialize};

use crate::{ModelClient, ModelError, ProviderMetadata};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client. Holds the only secret of the system.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_url: String, model: String, max_tokens: u32, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            model,
            max_tokens,
            api_key,
        }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.model.clone(),
            config.max_tokens,
            config.api_key.clone(),
        )
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(&self, prompt: &str, system_prompt: &str) -> Result<String, ModelError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ModelError::MissingApiKey);
        };

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: system_prompt,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Erreur API ({})", status.as_u16()));

            tracing::warn!("Model API error: status={}, message={}", status, message);
            return Err(ModelError::Api(message));
        }

        let data: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        Ok(data
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .unwrap_or_default())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Anthropic".to_string(),
            model: self.model.clone(),
        }
    }
}
