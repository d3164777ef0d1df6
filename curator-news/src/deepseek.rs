//! DeepSeek generative news provider

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

use curator_core::GeneratedArticle;

use crate::error::NewsError;
use crate::generated::{news_prompt, parse_generated_articles, GenerativeNewsProvider};
use crate::llm::ChatClient;

const SYSTEM_PROMPT: &str =
    "You are a news aggregator. Respond with a JSON array of news articles and nothing else.";

/// Generated news through DeepSeek's OpenAI-compatible chat API
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    chat: ChatClient,
}

impl DeepSeekClient {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl GenerativeNewsProvider for DeepSeekClient {
    fn name(&self) -> &str {
        "deepseek"
    }

    #[instrument(skip(self))]
    async fn fetch_generated_articles(
        &self,
        query: &str,
    ) -> Result<Vec<GeneratedArticle>, NewsError> {
        let content = self
            .chat
            .complete(SYSTEM_PROMPT, &news_prompt(query), 0.7)
            .await?;

        let articles = parse_generated_articles(&content, Utc::now())?;
        info!("DeepSeek returned {} articles for '{}'", articles.len(), query);
        Ok(articles)
    }
}
