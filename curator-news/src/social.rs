//! Social post fetchers

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use curator_core::SocialPost;

use crate::error::NewsError;
use crate::types::SocialFeedDocument;

/// Demo accounts compiled into the binary
const BUILTIN_SOCIAL_FEED: &str = include_str!("../data/social.json");

/// A source of recent posts by account handle
#[async_trait]
pub trait SocialPostFetcher: Send + Sync {
    /// Posts for `handles`. Unknown handles contribute nothing.
    async fn fetch_social_posts(&self, handles: &[String]) -> Result<Vec<SocialPost>, NewsError>;
}

/// Handle without its leading '@', for comparison
fn bare_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix('@').unwrap_or(handle)
}

// ============================================================================
// HTTP feed
// ============================================================================

/// Fetches `GET {base}/users/{handle}/posts` for each handle
pub struct HttpSocialClient {
    client: Client,
    base_url: String,
}

impl HttpSocialClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_handle(&self, handle: &str) -> Result<Vec<SocialPost>, NewsError> {
        let url = format!(
            "{}/users/{}/posts",
            self.base_url,
            urlencoding::encode(bare_handle(handle))
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl SocialPostFetcher for HttpSocialClient {
    async fn fetch_social_posts(&self, handles: &[String]) -> Result<Vec<SocialPost>, NewsError> {
        let results = join_all(handles.iter().map(|handle| self.fetch_handle(handle))).await;

        let mut posts = Vec::new();
        for (handle, result) in handles.iter().zip(results) {
            match result {
                Ok(mut batch) => {
                    debug!("Fetched {} posts for {}", batch.len(), handle);
                    posts.append(&mut batch);
                }
                Err(e) => warn!("Social fetch failed for {}: {}", handle, e),
            }
        }
        Ok(posts)
    }
}

// ============================================================================
// Demo feed
// ============================================================================

/// Public profile of a demo account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccount {
    pub handle: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub post_count: usize,
}

/// In-memory feed of fixed demo accounts
#[derive(Debug, Clone, Default)]
pub struct DemoSocialFeed {
    document: SocialFeedDocument,
}

impl DemoSocialFeed {
    /// Load the embedded demo accounts
    pub fn builtin() -> Result<Self, NewsError> {
        Self::from_json(BUILTIN_SOCIAL_FEED)
    }

    pub fn from_json(json: &str) -> Result<Self, NewsError> {
        let document: SocialFeedDocument = serde_json::from_str(json)
            .map_err(|e| NewsError::ParseError(format!("Invalid social feed JSON: {}", e)))?;
        Ok(Self { document })
    }

    pub fn accounts(&self) -> Vec<SocialAccount> {
        self.document
            .accounts
            .iter()
            .map(|account| SocialAccount {
                handle: account.handle.clone(),
                name: account.name.clone(),
                avatar_url: account.avatar_url.clone(),
                bio: account.bio.clone(),
                post_count: account.posts.len(),
            })
            .collect()
    }

    /// Posts of one account; empty for unknown handles
    pub fn posts_for(&self, handle: &str) -> &[SocialPost] {
        let wanted = bare_handle(handle);
        self.document
            .accounts
            .iter()
            .find(|account| bare_handle(&account.handle) == wanted)
            .map(|account| account.posts.as_slice())
            .unwrap_or(&[])
    }
}

#[async_trait]
impl SocialPostFetcher for DemoSocialFeed {
    async fn fetch_social_posts(&self, handles: &[String]) -> Result<Vec<SocialPost>, NewsError> {
        Ok(handles
            .iter()
            .flat_map(|handle| self.posts_for(handle).iter().cloned())
            .collect())
    }
}
