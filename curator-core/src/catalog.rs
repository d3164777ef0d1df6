//! Read-only repository of static feed articles
//!
//! The catalog is built once at startup from a JSON document and shared
//! with every aggregation run. Lookups never touch the network.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CuratorError, CuratorResult};

/// Demo catalog compiled into the binary
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// An article from a static feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Feed display name. Filled from the feed when the article omits it.
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// On-disk catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    feeds: Vec<FeedDocument>,
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    name: String,
    #[serde(default)]
    articles: Vec<CatalogArticle>,
}

/// Mapping from feed name to its fixed article list
#[derive(Debug, Clone, Default)]
pub struct CatalogRepository {
    feeds: IndexMap<String, Vec<CatalogArticle>>,
}

impl CatalogRepository {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a feed
    pub fn with_feed(mut self, name: impl Into<String>, articles: Vec<CatalogArticle>) -> Self {
        self.insert_feed(name.into(), articles);
        self
    }

    /// Load the demo catalog embedded in the binary
    pub fn builtin() -> CuratorResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog document from disk
    pub fn load(path: impl AsRef<Path>) -> CuratorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CuratorError::catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {} ({} feeds)",
            path.display(),
            catalog.feeds.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog document: `{"feeds": [{"name": ..., "articles": [...]}]}`
    pub fn from_json(json: &str) -> CuratorResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| CuratorError::parse(format!("Invalid catalog JSON: {}", e)))?;

        let mut catalog = Self::new();
        for feed in document.feeds {
            if feed.name.trim().is_empty() {
                return Err(CuratorError::catalog("Feed name cannot be empty"));
            }
            catalog.insert_feed(feed.name, feed.articles);
        }
        Ok(catalog)
    }

    fn insert_feed(&mut self, name: String, mut articles: Vec<CatalogArticle>) {
        for article in &mut articles {
            if article.source_name.trim().is_empty() {
                article.source_name = name.clone();
            }
        }
        self.feeds.insert(name, articles);
    }

    /// Articles for a feed; empty for unknown names
    pub fn lookup(&self, source_name: &str) -> &[CatalogArticle] {
        self.feeds
            .get(source_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Feed names in declaration order
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.feeds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}
