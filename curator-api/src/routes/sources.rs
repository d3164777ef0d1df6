//! Selectable sources

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use curator_news::SocialAccount;

use crate::AppState;

#[derive(Debug, Serialize)]
struct CatalogFeed {
    name: String,
    article_count: usize,
}

#[derive(Debug, Serialize)]
struct SourcesResponse {
    catalog: Vec<CatalogFeed>,
    accounts: Vec<SocialAccount>,
}

/// GET /api/sources - Catalog feeds and social accounts a digest can use
async fn list_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    let catalog = state.curator.catalog();
    let feeds = catalog
        .source_names()
        .map(|name| CatalogFeed {
            name: name.to_string(),
            article_count: catalog.lookup(name).len(),
        })
        .collect();

    Json(SourcesResponse {
        catalog: feeds,
        accounts: state.curator.accounts().to_vec(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/sources", get(list_sources))
}

#[cfg(test)]
mod tests {
    use crate::test_support::get;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_lists_demo_sources() {
        let (status, body) = get("/api/sources").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["catalog"][1]["name"], "ESPN Sports");
        assert_eq!(body["catalog"][1]["article_count"], 7);
        assert_eq!(body["accounts"][0]["handle"], "@TechGuru_AI");
    }
}
