//! Sarvam AI text-to-speech client

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::NewsError;
use crate::types::{SarvamTtsRequest, SarvamTtsResponse};

/// Speech provider that turns narration text into audio bytes
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// WAV audio for `text`. Callers truncate `text` beforehand.
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, NewsError>;
}

/// Sarvam AI client
pub struct SarvamClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SarvamClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.sarvam.ai".to_string(),
        }
    }

    fn request_body(text: &str) -> SarvamTtsRequest {
        SarvamTtsRequest {
            inputs: vec![text.to_string()],
            target_language_code: "en-IN".to_string(),
            speaker: "meera".to_string(),
            pace: 1.3,
            speech_sample_rate: 22050,
            enable_preprocessing: true,
            model: "bulbul:v2".to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for SarvamClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, NewsError> {
        if text.trim().is_empty() {
            return Err(NewsError::InvalidRequest("Text is required".to_string()));
        }

        let response = self
            .client
            .post(format!("{}/text-to-speech", self.base_url))
            .header("api-subscription-key", &self.api_key)
            .json(&Self::request_body(text))
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::from_response(response).await);
        }

        let body: SarvamTtsResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        let encoded = body
            .audios
            .first()
            .ok_or_else(|| NewsError::ParseError("No audio in response".to_string()))?;

        let audio = STANDARD
            .decode(encoded)
            .map_err(|e| NewsError::ParseError(format!("Invalid audio encoding: {}", e)))?;

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}
