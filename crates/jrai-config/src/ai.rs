use std::env;

use serde::{Deserialize, Serialize};

fn default_api_key() -> String {
    env::var("GEMINI_API_KEY").unwrap_or_default()
}

fn default_base_url() -> String {
    env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string())
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_jrai_voice() -> String {
    "Puck".to_string()
}

fn default_viet_voice() -> String {
    "Kore".to_string()
}

fn default_timeout_seconds() -> u64 {
    env::var("GEMINI_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30)
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model answering explanation prompts
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model producing speech
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_jrai_voice")]
    pub jrai_voice: String,
    #[serde(default = "default_viet_voice")]
    pub viet_voice: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl AiConfig {
    pub fn new() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            text_model: default_text_model(),
            tts_model: default_tts_model(),
            jrai_voice: default_jrai_voice(),
            viet_voice: default_viet_voice(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
