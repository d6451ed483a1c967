use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{AiError, Explainer, Language, SpeechSynthesizer};

/// Gemini `generateContent` client used for both explanations and speech
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    tts_model: String,
    jrai_voice: String,
    viet_voice: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: api_base(base_url),
            text_model: "gemini-2.5-flash".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            jrai_voice: "Puck".to_string(),
            viet_voice: "Kore".to_string(),
        })
    }

    pub fn with_models(mut self, text_model: String, tts_model: String) -> Self {
        self.text_model = text_model;
        self.tts_model = tts_model;
        self
    }

    pub fn with_voices(mut self, jrai_voice: String, viet_voice: String) -> Self {
        self.jrai_voice = jrai_voice;
        self.viet_voice = viet_voice;
        self
    }

    fn voice_for(&self, language: Language) -> &str {
        match language {
            Language::Jrai => &self.jrai_voice,
            Language::Viet => &self.viet_voice,
        }
    }

    async fn generate(&self, model: &str, body: Value) -> Result<Value, AiError> {
        if self.api_key.trim().is_empty() {
            return Err(AiError::AuthenticationError);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.trim())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(AiError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(AiError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| AiError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Explainer for GeminiClient {
    async fn request_explanation(&self, headword: &str, gloss: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Giải thích ngắn gọn bằng tiếng Việt từ tiếng Jrai \"{headword}\" (nghĩa: \"{gloss}\"). \
             Cho một câu ví dụ bằng tiếng Jrai kèm bản dịch tiếng Việt."
        );
        let body = json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": { "temperature": 0.4 }
        });

        let response = self.generate(&self.text_model, body).await?;
        extract_text(&response).ok_or_else(|| AiError::ApiError("No text in response".to_string()))
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Option<String>, AiError> {
        let prompt = match language {
            Language::Jrai => format!("Say slowly and clearly: {text}"),
            Language::Viet => format!("Đọc chậm và rõ ràng: {text}"),
        };
        let body = json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.voice_for(language) }
                    }
                }
            }
        });

        let response = self.generate(&self.tts_model, body).await?;
        let audio = extract_audio(&response);
        if audio.is_none() {
            tracing::warn!("Speech response for '{}' carried no audio", text);
        }
        Ok(audio)
    }
}

/// Accepts both the bare host and a versioned base
fn api_base(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let base = if base.is_empty() {
        "https://generativelanguage.googleapis.com"
    } else {
        base
    };

    if base.ends_with("/v1beta") || base.ends_with("/v1") {
        base.to_string()
    } else {
        format!("{base}/v1beta")
    }
}

fn first_candidate_parts(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .into_iter()
        .flatten()
}

fn extract_text(response: &Value) -> Option<String> {
    let text: String = first_candidate_parts(response)
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn extract_audio(response: &Value) -> Option<String> {
    first_candidate_parts(response)
        .filter_map(|part| part.get("inlineData"))
        .filter_map(|data| data.get("data").and_then(|d| d.as_str()))
        .find(|data| !data.is_empty())
        .map(str::to_string)
}
