use std::env;

use jrai_core::SearchOptions;
use serde::{Deserialize, Serialize};

use self::ai::AiConfig;
use self::audio::AudioConfig;
use self::quiz::QuizConfig;
use self::storage::StorageConfig;

pub mod ai;
pub mod audio;
pub mod quiz;
pub mod storage;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub search: SearchOptions,
    pub quiz: QuizConfig,
    pub ai: AiConfig,
    pub audio: AudioConfig,

    /// Shared secret asked for before exporting data
    pub admin_secret: String,
    /// Emit logs as JSON lines instead of plain text
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        let admin_secret =
            env::var("JRAI_ADMIN_SECRET").unwrap_or_else(|_| "jrai-admin".to_string());

        let log_json = env::var("JRAI_LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            storage: StorageConfig::new(),
            search: SearchOptions::default(),
            quiz: QuizConfig::default(),
            ai: AiConfig::new(),
            audio: AudioConfig::new(),

            admin_secret,
            log_json,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
