use serde::{Deserialize, Serialize};

fn default_batch_size() -> usize {
    jrai_core::quiz::DEFAULT_BATCH_SIZE
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuizConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}
