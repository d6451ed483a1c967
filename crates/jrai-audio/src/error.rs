#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Output unavailable: {0}")]
    Unavailable(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
