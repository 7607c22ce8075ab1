use std::env;

use serde::{Deserialize, Serialize};

const PLACEHOLDER_MARKER: &str = "YOUR_PROJECT";

fn default_proxy_url() -> String {
    "https://YOUR_PROJECT.vercel.app/api/claude".to_string()
}

fn default_bridge_addr() -> String {
    "127.0.0.1:8765".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Settings of the page host (the side that talks to the browser)
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    /// WebSocket address the browser shim connects to
    #[serde(default = "default_bridge_addr")]
    pub bridge_addr: String,
    /// Target language used until one is picked
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        let proxy_url = env::var("LB_PROXY_URL").unwrap_or_else(|_| default_proxy_url());
        let bridge_addr = env::var("LB_BRIDGE_ADDR").unwrap_or_else(|_| default_bridge_addr());
        let default_language =
            env::var("LB_DEFAULT_LANGUAGE").unwrap_or_else(|_| default_language());

        Self {
            proxy_url,
            bridge_addr,
            default_language,
        }
    }

    pub fn proxy_configured(&self) -> bool {
        proxy_url_configured(&self.proxy_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            bridge_addr: default_bridge_addr(),
            default_language: default_language(),
        }
    }
}

/// False while the proxy URL is empty or still the shipped placeholder
pub fn proxy_url_configured(url: &str) -> bool {
    !url.trim().is_empty() && !url.contains(PLACEHOLDER_MARKER)
}
