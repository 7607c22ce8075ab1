use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::client::ClientConfig;
use self::proxy::ProxyConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod client;
pub mod proxy;
pub mod storage;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub proxy: ProxyConfig,
    pub client: ClientConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    /// Build config from environment variables
    pub fn new() -> Self {
        Config {
            proxy: ProxyConfig::new(),
            client: ClientConfig::new(),
            ui: UiConfig::new(),
            storage: StorageConfig::new(),
        }
    }

    /// Load a JSON config file; missing fields fall back to defaults.
    /// The API key is never read from the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(data)?;
        config.proxy.api_key = proxy::api_key_from_env();
        Ok(config)
    }
}
