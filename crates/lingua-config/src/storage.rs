use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_vocab_max() -> usize {
    500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Vocabulary capacity, oldest entries are evicted past it
    #[serde(default = "default_vocab_max")]
    pub vocab_max: usize,
}

impl StorageConfig {
    pub fn new() -> Self {
        let data_dir = env::var("LB_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let vocab_max = env::var("LB_VOCAB_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_vocab_max);

        Self {
            data_dir,
            vocab_max,
        }
    }

    /// Per-page local storage (vocabulary)
    pub fn local_path(&self) -> PathBuf {
        self.data_dir.join("local.json")
    }

    /// Synced settings (target language)
    pub fn sync_path(&self) -> PathBuf {
        self.data_dir.join("sync.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vocab_max: default_vocab_max(),
        }
    }
}
