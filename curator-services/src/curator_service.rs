//! Curator Service
//!
//! Builds a news digest for one request. The generated stream and the
//! social stream (fetch, then relevance filter) are fetched concurrently.
//! Each is bounded by a timeout and degrades instead of failing:
//! - generated or social failures contribute nothing
//! - a relevance filter failure lets every post through
//!
//! The merge itself is the deterministic core aggregator. Dropping the
//! returned future cancels any in-flight call.

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use curator_core::{
    AggregateInput, Aggregator, CatalogRepository, Cluster, GeneratedArticle, SocialPost,
};
use curator_news::{
    ChatClient, DeepSeekClient, DemoSocialFeed, GeminiClient, GenerativeNewsProvider,
    HttpSocialClient, LlmPostFilter, NewsError, PostRelevanceFilter, SarvamClient, SocialAccount,
    SocialPostFetcher, SpeechSynthesizer,
};

use crate::config::{ConfigError, CuratorConfig, ProviderKind};
use crate::narration::{narration_text, truncate_for_speech};

/// Time limits for each collaborator call
#[derive(Debug, Clone, Copy)]
pub struct ServiceTimeouts {
    pub provider: Duration,
    pub filter: Duration,
    pub social: Duration,
}

impl Default for ServiceTimeouts {
    fn default() -> Self {
        Self {
            provider: Duration::from_secs(30),
            filter: Duration::from_secs(20),
            social: Duration::from_secs(15),
        }
    }
}

/// What the reader asked for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestRequest {
    #[serde(default)]
    pub prompt: String,
    /// Social account handles, with or without '@'
    #[serde(default)]
    pub handles: Vec<String>,
    /// Catalog feed names
    #[serde(default)]
    pub sources: Vec<String>,
}

impl DigestRequest {
    /// The reader picked neither accounts nor feeds
    pub fn no_sources_selected(&self) -> bool {
        self.handles.is_empty() && self.sources.is_empty()
    }
}

/// A ranked cluster with the text read out for it
#[derive(Debug, Clone, Serialize)]
pub struct DigestCluster {
    #[serde(flatten)]
    pub cluster: Cluster,
    /// Headline and summary, already cut to the speech limit
    pub narration: String,
}

impl From<Cluster> for DigestCluster {
    fn from(cluster: Cluster) -> Self {
        let narration = narration_text(&cluster);
        Self { cluster, narration }
    }
}

impl Deref for DigestCluster {
    type Target = Cluster;

    fn deref(&self) -> &Cluster {
        &self.cluster
    }
}

/// Ranked clusters for one request
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub clusters: Vec<DigestCluster>,
    /// Tells "nothing selected" apart from "nothing relevant found"
    pub no_sources_selected: bool,
    pub query: String,
}

/// Orchestrates collaborators and the core pipeline
pub struct CuratorService {
    catalog: Arc<CatalogRepository>,
    provider: Option<Arc<dyn GenerativeNewsProvider>>,
    social: Arc<dyn SocialPostFetcher>,
    filter: Option<Arc<dyn PostRelevanceFilter>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    accounts: Vec<SocialAccount>,
    timeouts: ServiceTimeouts,
}

impl CuratorService {
    /// Create a service over a catalog and a social feed; other collaborators are optional
    pub fn new(catalog: Arc<CatalogRepository>, social: Arc<dyn SocialPostFetcher>) -> Self {
        Self {
            catalog,
            provider: None,
            social,
            filter: None,
            speech: None,
            accounts: Vec::new(),
            timeouts: ServiceTimeouts::default(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn GenerativeNewsProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_filter(mut self, filter: Arc<dyn PostRelevanceFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Accounts advertised to clients
    pub fn with_accounts(mut self, accounts: Vec<SocialAccount>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_timeouts(mut self, timeouts: ServiceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Wire up every collaborator from configuration
    pub fn from_config(config: &CuratorConfig) -> Result<Self, ConfigError> {
        let catalog = match &config.catalog_path {
            Some(path) => CatalogRepository::load(path)?,
            None => CatalogRepository::builtin()?,
        };

        let (social, accounts): (Arc<dyn SocialPostFetcher>, Vec<SocialAccount>) =
            match &config.social_api_base {
                Some(base) => {
                    info!("Using social feed at {}", base);
                    (Arc::new(HttpSocialClient::new(base)), Vec::new())
                }
                None => {
                    let demo = DemoSocialFeed::builtin()?;
                    let accounts = demo.accounts();
                    info!("Using demo social feed ({} accounts)", accounts.len());
                    (Arc::new(demo), accounts)
                }
            };

        let mut service = Self::new(Arc::new(catalog), social)
            .with_accounts(accounts)
            .with_timeouts(ServiceTimeouts {
                provider: config.provider_timeout(),
                filter: config.filter_timeout(),
                social: config.social_timeout(),
            });

        let chat = match &config.deepseek_api_key {
            Some(key) => Some(ChatClient::new(
                key,
                &config.deepseek_api_base,
                &config.deepseek_model,
            )?),
            None => None,
        };

        match (config.provider, &chat, &config.gemini_api_key) {
            (ProviderKind::DeepSeek, Some(chat), _) => {
                service = service.with_provider(Arc::new(DeepSeekClient::new(chat.clone())));
            }
            (ProviderKind::Gemini, _, Some(key)) => {
                service = service.with_provider(Arc::new(GeminiClient::new(
                    key.clone(),
                    config.gemini_model.clone(),
                )));
            }
            (ProviderKind::Disabled, _, _) => info!("Generative provider disabled"),
            (kind, _, _) => warn!(
                "No API key for generative provider {:?}; generated news disabled",
                kind
            ),
        }

        match chat {
            Some(chat) => {
                info!("Relevance filter using model {}", chat.model());
                service = service.with_filter(Arc::new(LlmPostFilter::new(chat)));
            }
            None => info!("No relevance filter configured; all social posts pass"),
        }

        if let Some(key) = &config.sarvam_api_key {
            service = service.with_speech(Arc::new(SarvamClient::new(key.clone())));
        }

        Ok(service)
    }

    pub fn catalog(&self) -> &CatalogRepository {
        &self.catalog
    }

    pub fn accounts(&self) -> &[SocialAccount] {
        &self.accounts
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    /// Build the ranked digest for one request
    #[instrument(skip(self, request), fields(prompt = %request.prompt))]
    pub async fn digest(&self, request: &DigestRequest) -> Digest {
        let prompt = request.prompt.trim();

        let (generated, social_posts) = tokio::join!(
            self.generated_or_empty(prompt),
            self.relevant_posts(&request.handles, prompt),
        );

        // all streams are in; merge in the fixed order
        let clusters = Aggregator::new(&self.catalog, Utc::now()).aggregate(AggregateInput {
            prompt,
            social_posts: &social_posts,
            catalog_sources: &request.sources,
            generated: &generated,
        });

        info!(
            "Digest for '{}': {} posts, {} generated, {} clusters",
            prompt,
            social_posts.len(),
            generated.len(),
            clusters.len()
        );

        Digest {
            clusters: clusters.into_iter().map(DigestCluster::from).collect(),
            no_sources_selected: request.no_sources_selected(),
            query: request.prompt.clone(),
        }
    }

    /// Generated items, or the error that prevented them
    pub async fn fetch_generated(&self, query: &str) -> Result<Vec<GeneratedArticle>, NewsError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            NewsError::InvalidConfig("No generative provider configured".to_string())
        })?;
        bounded(
            self.timeouts.provider,
            provider.fetch_generated_articles(query),
        )
        .await
    }

    /// Generated items; empty on any failure
    pub async fn generated_or_empty(&self, query: &str) -> Vec<GeneratedArticle> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };
        match bounded(
            self.timeouts.provider,
            provider.fetch_generated_articles(query),
        )
        .await
        {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Generated stream from {} dropped: {}", provider.name(), e);
                Vec::new()
            }
        }
    }

    /// Posts for `handles`; empty on failure and without a fetch for no handles
    pub async fn social_posts(&self, handles: &[String]) -> Vec<SocialPost> {
        if handles.is_empty() {
            return Vec::new();
        }
        match bounded(self.timeouts.social, self.social.fetch_social_posts(handles)).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Social stream dropped: {}", e);
                Vec::new()
            }
        }
    }

    /// Posts relevant to `prompt`; every post on filter failure
    pub async fn filter_posts(&self, posts: Vec<SocialPost>, prompt: &str) -> Vec<SocialPost> {
        let Some(filter) = &self.filter else {
            return posts;
        };
        if posts.is_empty() {
            return posts;
        }

        match bounded(self.timeouts.filter, filter.filter_posts(&posts, prompt)).await {
            Ok(kept) => kept,
            Err(e) => {
                warn!("Relevance filter failed, keeping all {} posts: {}", posts.len(), e);
                posts
            }
        }
    }

    async fn relevant_posts(&self, handles: &[String], prompt: &str) -> Vec<SocialPost> {
        let posts = self.social_posts(handles).await;
        debug!("Fetched {} social posts", posts.len());
        self.filter_posts(posts, prompt).await
    }

    /// Audio for `text`, cut to the speech limit first
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, NewsError> {
        let speech = self.speech.as_ref().ok_or_else(|| {
            NewsError::InvalidConfig("No speech provider configured".to_string())
        })?;
        let text = truncate_for_speech(text.trim());
        bounded(self.timeouts.provider, speech.synthesize_speech(&text)).await
    }
}

/// Run `future` under `limit`, mapping expiry to [`NewsError::Timeout`]
async fn bounded<T, F>(limit: Duration, future: F) -> Result<T, NewsError>
where
    F: Future<Output = Result<T, NewsError>>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| NewsError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sources_selected() {
        let request = DigestRequest {
            prompt: "ai".to_string(),
            ..Default::default()
        };
        assert!(request.no_sources_selected());

        let request = DigestRequest {
            prompt: "ai".to_string(),
            sources: vec!["TechCrunch AI".to_string()],
            ..Default::default()
        };
        assert!(!request.no_sources_selected());
    }

    #[test]
    fn test_request_defaults_lists() {
        let request: DigestRequest = serde_json::from_str(r#"{"prompt": "cricket"}"#).unwrap();
        assert!(request.handles.is_empty());
        assert!(request.sources.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result: Result<(), NewsError> = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, NewsError::Timeout(limit) if limit == Duration::from_millis(10)));
        assert_eq!(err.to_string(), "Timed out after 10ms");
    }

    #[test]
    fn test_from_config_without_keys() {
        let service = CuratorService::from_config(&CuratorConfig::default()).unwrap();
        assert!(!service.has_provider());
        assert!(!service.has_speech());
        assert_eq!(service.accounts().len(), 3);
        assert_eq!(service.catalog().len(), 3);
    }
}
