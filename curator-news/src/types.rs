//! Wire types for the collaborator APIs

use serde::{Deserialize, Serialize};

use curator_core::SocialPost;

// ============================================================================
// Gemini
// ============================================================================

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateRequest {
    pub contents: Vec<GeminiContent>,
    pub tools: Vec<GeminiTool>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Enables search grounding
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeminiTool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GeminiGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiGenerateResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

impl GeminiGenerateResponse {
    /// Text of the first part of the first candidate
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }
}

// ============================================================================
// Sarvam AI
// ============================================================================

/// Request body for `POST /text-to-speech`
#[derive(Debug, Clone, Serialize)]
pub struct SarvamTtsRequest {
    pub inputs: Vec<String>,
    pub target_language_code: String,
    pub speaker: String,
    pub pace: f32,
    pub speech_sample_rate: u32,
    pub enable_preprocessing: bool,
    pub model: String,
}

/// Response from `POST /text-to-speech`, audio as base64 WAV
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarvamTtsResponse {
    #[serde(default)]
    pub audios: Vec<String>,
}

// ============================================================================
// Social feed
// ============================================================================

/// An account in the demo social feed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialAccountDocument {
    pub handle: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub posts: Vec<SocialPost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialFeedDocument {
    #[serde(default)]
    pub accounts: Vec<SocialAccountDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_request_shape() {
        let request = GeminiGenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some("hello".to_string()),
                }],
            }],
            tools: vec![GeminiTool::default()],
            generation_config: GeminiGenerationConfig::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!(json["tools"][0]["google_search"].is_object());
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn test_gemini_first_text() {
        let response: GeminiGenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[]"}], "role": "model"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), Some("[]"));

        let empty: GeminiGenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }
}
