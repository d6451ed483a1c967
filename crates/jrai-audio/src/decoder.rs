use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DecodeError;

/// Sample rate of the synthesized speech stream
pub const PCM_SAMPLE_RATE: u32 = 24_000;

/// Normalized samples ready for an output device
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioBuffer {
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as u64 / u64::from(self.channels);
        Duration::from_micros(frames * 1_000_000 / u64::from(self.sample_rate))
    }
}

/// Decode base64 signed 16-bit little-endian mono PCM.
///
/// An empty payload yields an empty buffer. A trailing odd byte is dropped.
pub fn decode_base64_pcm(payload: &str, sample_rate: u32) -> Result<AudioBuffer, DecodeError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(AudioBuffer::mono(Vec::new(), sample_rate));
    }

    let bytes = STANDARD.decode(payload)?;
    Ok(AudioBuffer::mono(pcm16_to_f32(&bytes), sample_rate))
}

/// `sample = i16 / 32768.0`, no clipping or dithering
pub fn pcm16_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
        .collect()
}

/// Inverse of [`pcm16_to_f32`] for samples that came from 16-bit PCM
pub fn f32_to_pcm16(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}
