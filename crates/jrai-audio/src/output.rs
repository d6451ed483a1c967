use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::decoder::{AudioBuffer, f32_to_pcm16};
use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Running,
    Suspended,
}

/// Output context owned by a [`crate::SpeechPlayer`]
#[async_trait]
pub trait AudioOutput: Send + Sync {
    fn state(&self) -> ContextState;

    /// Bring a suspended context back to running
    async fn resume(&self) -> Result<(), AudioError>;

    /// Resolves once the whole buffer has been played
    async fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError>;
}

/// Renders every clip into a 16-bit WAV file.
///
/// Starts suspended; resuming creates the output directory.
pub struct WavOutput {
    dir: PathBuf,
    state: Mutex<ContextState>,
    clip_count: AtomicU64,
    last_clip: Mutex<Option<PathBuf>>,
}

impl WavOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            state: Mutex::new(ContextState::Suspended),
            clip_count: AtomicU64::new(0),
            last_clip: Mutex::new(None),
        }
    }

    pub fn last_clip(&self) -> Option<PathBuf> {
        self.last_clip
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: ContextState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn next_clip_path(&self) -> PathBuf {
        let n = self.clip_count.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.dir.join(format!("clip-{millis}-{n:03}.wav"))
    }
}

#[async_trait]
impl AudioOutput for WavOutput {
    fn state(&self) -> ContextState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn resume(&self) -> Result<(), AudioError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        self.set_state(ContextState::Running);
        tracing::debug!("WAV output resumed in {}", self.dir.display());
        Ok(())
    }

    async fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        if self.state() != ContextState::Running {
            return Err(AudioError::Unavailable("output not running".to_string()));
        }

        let path = self.next_clip_path();
        let spec = hound::WavSpec {
            channels: buffer.channels,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let samples = buffer.samples.clone();
        let target = path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), AudioError> {
            let mut writer = hound::WavWriter::create(&target, spec)?;
            for sample in samples {
                writer.write_sample(f32_to_pcm16(sample))?;
            }
            writer.finalize()?;
            Ok(())
        })
        .await
        .map_err(|e| AudioError::Unavailable(format!("writer task failed: {e}")))??;

        tracing::info!(
            "Played {:.2}s clip into {}",
            buffer.duration().as_secs_f32(),
            path.display()
        );
        *self.last_clip.lock().unwrap_or_else(PoisonError::into_inner) = Some(path);
        Ok(())
    }
}
