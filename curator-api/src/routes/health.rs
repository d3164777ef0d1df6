//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    catalog_feeds: usize,
    generative_provider: bool,
    speech: bool,
}

#[derive(Debug, Serialize)]
struct PingResponse {
    message: String,
}

/// Health check handler. Missing collaborators degrade features, not health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        catalog_feeds: state.curator.catalog().len(),
        generative_provider: state.curator.has_provider(),
        speech: state.curator.has_speech(),
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: format!("Pong! {}", chrono::Utc::now().timestamp_millis()),
    })
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/ping", get(ping))
}
