//! Text-to-speech endpoint

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
struct TtsResponse {
    success: bool,
    /// Base64 WAV audio
    audio: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/tts", post(text_to_speech))
}

/// POST /api/tts - Speak a narration, cut to the provider's length limit
async fn text_to_speech(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> impl IntoResponse {
    if request.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Text is required" })),
        )
            .into_response();
    }

    if !state.curator.has_speech() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": "Speech provider not configured. Set SARVAM_API_KEY."
            })),
        )
            .into_response();
    }

    match state.curator.synthesize(&request.text).await {
        Ok(audio) => (
            StatusCode::OK,
            Json(TtsResponse {
                success: true,
                audio: STANDARD.encode(audio),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to generate audio: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": format!("Failed to generate audio: {}", e)
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::post_json;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_text_required() {
        let (status, _) = post_json("/api/tts", json!({ "text": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unconfigured_speech() {
        let (status, _) = post_json("/api/tts", json!({ "text": "Hello there" })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
