use std::env;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    env::var("JRAI_DATA_DIR").unwrap_or_else(|_| "data".to_string())
}

/// Bumping the version abandons documents written under the previous key
fn default_storage_key() -> String {
    env::var("JRAI_STORAGE_KEY").unwrap_or_else(|_| "jrai_dictionary_v3".to_string())
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new()
    }
}
