//! API route definitions

mod digest;
mod health;
mod news;
mod sources;
mod tts;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(sources::routes())
        .merge(digest::routes())
        .merge(news::routes())
        .merge(tts::routes())
}
