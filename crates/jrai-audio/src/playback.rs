use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use jrai_ai::{Language, SpeechSynthesizer};
use tokio::sync::OnceCell;

use crate::decoder::decode_base64_pcm;
use crate::error::AudioError;
use crate::output::{AudioOutput, ContextState};

/// Shown when the synthesis service produced nothing playable
pub const NO_AUDIO_NOTICE: &str = "No pronunciation is available for this word right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Requesting,
    Decoding,
    Playing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackOutcome {
    Played { duration: Duration },
    /// Another playback was in flight; the request was dropped
    Busy,
    /// Nothing to play, with a notice for the user
    NoAudio(String),
    Failed(String),
}

pub type OutputFactory = Box<dyn Fn() -> Result<Box<dyn AudioOutput>, AudioError> + Send + Sync>;

/// Single-flight pronunciation player.
///
/// Owns the output context, created on first use and reused afterwards.
/// State moves `Idle → Requesting → Decoding → Playing → Idle`; a request that
/// arrives while not idle is dropped.
pub struct SpeechPlayer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    factory: OutputFactory,
    output: OnceCell<Box<dyn AudioOutput>>,
    state: Mutex<PlaybackState>,
    sample_rate: u32,
}

impl SpeechPlayer {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        factory: OutputFactory,
        sample_rate: u32,
    ) -> Self {
        Self {
            synthesizer,
            factory,
            output: OnceCell::new(),
            state: Mutex::new(PlaybackState::Idle),
            sample_rate,
        }
    }

    pub fn state(&self) -> PlaybackState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Synthesize `text` and play it
    pub async fn speak(&self, text: &str, language: Language) -> PlaybackOutcome {
        let Some(flight) = self.begin(PlaybackState::Requesting) else {
            tracing::debug!("Playback busy, dropping request for '{}'", text);
            return PlaybackOutcome::Busy;
        };

        let payload = match self.synthesizer.synthesize(text, language).await {
            Ok(Some(payload)) if !payload.trim().is_empty() => payload,
            Ok(_) => {
                tracing::warn!("Synthesis returned no audio for '{}'", text);
                return PlaybackOutcome::NoAudio(NO_AUDIO_NOTICE.to_string());
            }
            Err(e) => {
                tracing::warn!("Synthesis failed for '{}': {}", text, e);
                return PlaybackOutcome::NoAudio(NO_AUDIO_NOTICE.to_string());
            }
        };

        flight.advance(PlaybackState::Decoding);
        self.decode_and_play(&flight, &payload).await
    }

    /// Play a stored base64 PCM clip without asking the synthesizer
    pub async fn play_clip(&self, payload: &str) -> PlaybackOutcome {
        let Some(flight) = self.begin(PlaybackState::Decoding) else {
            tracing::debug!("Playback busy, dropping stored clip");
            return PlaybackOutcome::Busy;
        };

        self.decode_and_play(&flight, payload).await
    }

    async fn decode_and_play(&self, flight: &Flight<'_>, payload: &str) -> PlaybackOutcome {
        let buffer = match decode_base64_pcm(payload, self.sample_rate) {
            Ok(buffer) if !buffer.is_empty() => buffer,
            Ok(_) => return PlaybackOutcome::NoAudio(NO_AUDIO_NOTICE.to_string()),
            Err(e) => {
                tracing::warn!("Failed to decode audio: {}", e);
                return PlaybackOutcome::Failed(e.to_string());
            }
        };

        let output = match self.output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Audio output unavailable: {}", e);
                return PlaybackOutcome::Failed(e.to_string());
            }
        };

        // Autoplay policies may suspend the context between plays
        if output.state() == ContextState::Suspended
            && let Err(e) = output.resume().await
        {
            tracing::error!("Failed to resume audio output: {}", e);
            return PlaybackOutcome::Failed(e.to_string());
        }

        flight.advance(PlaybackState::Playing);
        match output.play(&buffer).await {
            Ok(()) => PlaybackOutcome::Played {
                duration: buffer.duration(),
            },
            Err(e) => {
                tracing::error!("Playback failed: {}", e);
                PlaybackOutcome::Failed(e.to_string())
            }
        }
    }

    async fn output(&self) -> Result<&dyn AudioOutput, AudioError> {
        let output = self
            .output
            .get_or_try_init(|| async {
                tracing::debug!("Creating audio output context");
                (self.factory)()
            })
            .await?;
        Ok(output.as_ref())
    }

    fn begin(&self, first: PlaybackState) -> Option<Flight<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != PlaybackState::Idle {
            return None;
        }
        *state = first;
        tracing::debug!("Playback state: Idle -> {:?}", first);
        Some(Flight { player: self })
    }

    fn set_state(&self, next: PlaybackState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!("Playback state: {:?} -> {:?}", *state, next);
        *state = next;
    }
}

/// The in-flight playback; returns the player to idle when dropped
struct Flight<'a> {
    player: &'a SpeechPlayer,
}

impl Flight<'_> {
    fn advance(&self, next: PlaybackState) {
        self.player.set_state(next);
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        self.player.set_state(PlaybackState::Idle);
    }
}
