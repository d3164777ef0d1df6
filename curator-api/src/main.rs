//! News Curator API Server
//!
//! HTTP API server that builds clustered news digests from social posts,
//! catalog feeds and generated articles.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use curator_services::{CuratorConfig, CuratorService};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub curator: Arc<CuratorService>,
}

/// Build the full router for `state`
pub fn app(state: AppState) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,curator_api=debug")),
        )
        .init();

    info!("Starting News Curator API");

    let config = CuratorConfig::from_env()?;
    let curator = CuratorService::from_config(&config)?;
    info!(
        "Curator ready: {} catalog feeds, provider {}, speech {}",
        curator.catalog().len(),
        if curator.has_provider() { "on" } else { "off" },
        if curator.has_speech() { "on" } else { "off" },
    );

    let state = AppState {
        curator: Arc::new(curator),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// State wired to the built-in demo data and no network collaborators
    pub fn demo_state() -> AppState {
        let curator = CuratorService::from_config(&CuratorConfig::default())
            .expect("demo config loads");
        AppState {
            curator: Arc::new(curator),
        }
    }

    pub async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app(demo_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
