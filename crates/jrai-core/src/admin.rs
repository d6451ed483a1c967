use crate::error::AdminError;

/// Shared-secret check in front of data export.
///
/// Deters accidental exports only; anyone with the config can read the secret.
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, attempt: &str) -> Result<(), AdminError> {
        if !self.secret.is_empty() && attempt.trim() == self.secret {
            Ok(())
        } else {
            Err(AdminError::WrongSecret)
        }
    }
}
