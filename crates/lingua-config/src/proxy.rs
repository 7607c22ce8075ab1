use std::env;

use serde::{Deserialize, Serialize};

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_prompt_chars() -> usize {
    4000
}

/// Settings of the proxy endpoint
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProxyConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Model API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Hard limit for one upstream call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
    /// Only ever read from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl ProxyConfig {
    pub fn new() -> Self {
        let listen_addr = env::var("LB_PROXY_ADDR").unwrap_or_else(|_| default_listen_addr());
        let api_url = env::var("ANTHROPIC_API_URL").unwrap_or_else(|_| default_api_url());
        let model = env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| default_model());

        let timeout_ms = env::var("LB_UPSTREAM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self {
            listen_addr,
            api_url,
            model,
            max_tokens: default_max_tokens(),
            timeout_ms,
            max_prompt_chars: default_max_prompt_chars(),
            api_key: api_key_from_env(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            max_prompt_chars: default_max_prompt_chars(),
            api_key: None,
        }
    }
}

pub(crate) fn api_key_from_env() -> Option<String> {
    env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}
