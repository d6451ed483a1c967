pub mod decoder;
pub mod error;
pub mod output;
pub mod playback;

pub use decoder::{AudioBuffer, PCM_SAMPLE_RATE, decode_base64_pcm};
pub use error::{AudioError, DecodeError};
pub use output::{AudioOutput, ContextState, WavOutput};
pub use playback::{PlaybackOutcome, PlaybackState, SpeechPlayer};

#[cfg(test)]
mod tests;
