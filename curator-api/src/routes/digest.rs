//! Digest endpoint

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use tracing::info;

use curator_services::DigestRequest;

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/digest", post(create_digest))
}

/// POST /api/digest - Clustered, ranked digest for a prompt
async fn create_digest(
    State(state): State<AppState>,
    Json(request): Json<DigestRequest>,
) -> impl IntoResponse {
    if request.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Prompt is required" })),
        )
            .into_response();
    }

    info!(
        "Digest requested: {} handles, {} sources",
        request.handles.len(),
        request.sources.len()
    );

    let digest = state.curator.digest(&request).await;
    (StatusCode::OK, Json(digest)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::post_json;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let (status, body) = post_json("/api/digest", json!({ "prompt": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_cricket_digest_from_demo_data() {
        let (status, body) = post_json(
            "/api/digest",
            json!({ "prompt": "cricket", "sources": ["ESPN Sports"], "handles": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["no_sources_selected"], false);
        assert_eq!(body["query"], "cricket");
        let clusters = body["clusters"].as_array().unwrap();
        assert!(clusters.iter().any(|c| c["topic_key"] == "cricket"));
        assert!(clusters.iter().all(|c| c["time_ago"].is_string()));
        assert!(clusters
            .iter()
            .all(|c| !c["narration"].as_str().unwrap().is_empty()));
    }

    #[tokio::test]
    async fn test_nothing_selected() {
        let (status, body) = post_json("/api/digest", json!({ "prompt": "ai" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["no_sources_selected"], true);
        assert_eq!(body["clusters"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_demo_handles_feed_the_digest() {
        let (status, body) = post_json(
            "/api/digest",
            json!({ "prompt": "ai", "handles": ["TechGuru_AI"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let clusters = body["clusters"].as_array().unwrap();
        assert!(!clusters.is_empty());
        // no relevance filter without an API key, so every post is kept
        let items: u64 = clusters.iter().map(|c| c["item_count"].as_u64().unwrap()).sum();
        assert!(items >= 3);
    }
}
