use async_trait::async_trait;
use lingua_config::client::{ClientConfig, proxy_url_configured};
use lingua_types::{ProxyRequest, ProxyResponse};

use crate::{PromptClient, ProxyError};

/// HTTP client for the LinguaBridge proxy endpoint
#[derive(Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    /// `None` while the URL is unset or a placeholder
    endpoint: Option<String>,
}

impl ProxyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let endpoint = proxy_url_configured(&endpoint).then_some(endpoint);

        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.proxy_url.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[async_trait]
impl PromptClient for ProxyClient {
    async fn call(
        &self,
        prompt: &str,
        system_prompt: &str,
        target_language: &str,
    ) -> Result<String, ProxyError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err(ProxyError::NotConfigured);
        };

        let body = ProxyRequest {
            prompt: prompt.to_string(),
            system_prompt: system_prompt.to_string(),
            target_language: Some(target_language.to_string()),
        };

        tracing::debug!("Calling proxy: {} prompt chars", prompt.chars().count());

        let response = self.client.post(endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(ProxyError::Status(response.status().as_u16()));
        }

        let data: ProxyResponse = response.json().await?;

        if let Some(error) = data.error {
            return Err(ProxyError::Upstream(error));
        }

        Ok(data.result.unwrap_or_default())
    }
}
