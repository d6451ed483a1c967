mod gemini;

pub use gemini::GeminiClient;

/// Shown instead of an explanation whenever the service cannot provide one
pub const EXPLANATION_FALLBACK: &str =
    "Xin lỗi, hiện không thể kết nối với trợ lý AI để giải thích từ này. Vui lòng thử lại sau.";

/// Language a text is spoken in; selects the synthesis voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Jrai,
    Viet,
}

/// Speech synthesis provider interface
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text`, returning base64 16-bit PCM or `None` when the
    /// service answered without audio
    async fn synthesize(&self, text: &str, language: Language) -> Result<Option<String>, AiError>;
}

/// Word explanation provider interface
#[async_trait::async_trait]
pub trait Explainer: Send + Sync {
    /// Ask the service to explain a headword/gloss pair
    async fn request_explanation(&self, headword: &str, gloss: &str) -> Result<String, AiError>;

    /// Explanation text, or [`EXPLANATION_FALLBACK`] on any failure
    async fn explain(&self, headword: &str, gloss: &str) -> String {
        match self.request_explanation(headword, gloss).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Explanation for '{}' came back empty", headword);
                EXPLANATION_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Explanation for '{}' failed: {}", headword, e);
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExplainer(Result<&'static str, ()>);

    #[async_trait::async_trait]
    impl Explainer for FixedExplainer {
        async fn request_explanation(
            &self,
            _headword: &str,
            _gloss: &str,
        ) -> Result<String, AiError> {
            self.0
                .map(str::to_string)
                .map_err(|_| AiError::ApiError("HTTP 500".to_string()))
        }
    }

    #[tokio::test]
    async fn explain_passes_text_through() {
        let explainer = FixedExplainer(Ok("Aba là con ba ba."));
        assert_eq!(explainer.explain("Aba", "con ba ba").await, "Aba là con ba ba.");
    }

    #[tokio::test]
    async fn explain_falls_back_on_error() {
        let explainer = FixedExplainer(Err(()));
        assert_eq!(explainer.explain("Aba", "con ba ba").await, EXPLANATION_FALLBACK);
    }

    #[tokio::test]
    async fn explain_falls_back_on_blank_text() {
        let explainer = FixedExplainer(Ok("  \n"));
        assert_eq!(explainer.explain("Aba", "con ba ba").await, EXPLANATION_FALLBACK);
    }
}
