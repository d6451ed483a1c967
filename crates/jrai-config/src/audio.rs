use std::env;

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    env::var("JRAI_AUDIO_DIR").unwrap_or_else(|_| "data/audio".to_string())
}

fn default_sample_rate() -> u32 {
    24_000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AudioConfig {
    /// Where played clips are written as WAV files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Sample rate of the synthesized PCM stream
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl AudioConfig {
    pub fn new() -> Self {
        Self {
            output_dir: default_output_dir(),
            sample_rate: default_sample_rate(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::new()
    }
}
