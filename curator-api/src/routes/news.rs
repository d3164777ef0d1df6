//! Generated news and post filtering endpoints

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use curator_core::{NormalizedItem, SocialPost};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratedNewsRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
struct GeneratedNewsResponse {
    success: bool,
    articles: Vec<NormalizedItem>,
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterPostsRequest {
    #[serde(default)]
    pub posts: Vec<SocialPost>,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
struct FilterPostsResponse {
    filtered_posts: Vec<SocialPost>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generated-news", post(generated_news))
        .route("/filter-posts", post(filter_posts))
}

/// POST /api/generated-news - Provider articles for a query, normalized
async fn generated_news(
    State(state): State<AppState>,
    Json(request): Json<GeneratedNewsRequest>,
) -> impl IntoResponse {
    let query = request.query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Query is required" })),
        )
            .into_response();
    }

    if !state.curator.has_provider() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": "Generative provider not configured. Set DEEPSEEK_API_KEY or GEMINI_API_KEY."
            })),
        )
            .into_response();
    }

    match state.curator.fetch_generated(query).await {
        Ok(articles) => {
            let now = Utc::now();
            let articles = articles
                .iter()
                .map(|article| NormalizedItem::from_generated(article, now))
                .collect();
            (
                StatusCode::OK,
                Json(GeneratedNewsResponse {
                    success: true,
                    articles,
                    query: query.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to fetch generated news: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": format!("Failed to fetch generated news: {}", e)
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/filter-posts - Posts relevant to a prompt; all of them on failure
async fn filter_posts(
    State(state): State<AppState>,
    Json(request): Json<FilterPostsRequest>,
) -> Json<FilterPostsResponse> {
    let filtered_posts = state
        .curator
        .filter_posts(request.posts, request.prompt.trim())
        .await;
    Json(FilterPostsResponse { filtered_posts })
}
