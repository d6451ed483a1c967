#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Wrong admin secret")]
    WrongSecret,
}
