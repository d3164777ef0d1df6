//! Gemini generative news provider with search grounding

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, instrument};

use curator_core::GeneratedArticle;

use crate::error::NewsError;
use crate::generated::{news_prompt, parse_generated_articles, GenerativeNewsProvider};
use crate::types::{
    GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse, GeminiGenerationConfig,
    GeminiPart, GeminiTool,
};

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    fn request_body(query: &str) -> GeminiGenerateRequest {
        GeminiGenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(news_prompt(query)),
                }],
            }],
            tools: vec![GeminiTool::default()],
            generation_config: GeminiGenerationConfig::default(),
        }
    }
}

#[async_trait]
impl GenerativeNewsProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self))]
    async fn fetch_generated_articles(
        &self,
        query: &str,
    ) -> Result<Vec<GeneratedArticle>, NewsError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Requesting Gemini news for '{}'", query);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(query))
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::from_response(response).await);
        }

        let body: GeminiGenerateResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        let text = body
            .first_text()
            .ok_or_else(|| NewsError::ParseError("No content in Gemini response".to_string()))?;

        let articles = parse_generated_articles(text, Utc::now())?;
        info!("Gemini returned {} articles for '{}'", articles.len(), query);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_uses_search_tool() {
        let json = serde_json::to_value(GeminiClient::request_body("cricket")).unwrap();
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("about: cricket"));
        assert_eq!(json["tools"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_name() {
        let client = GeminiClient::new("key".to_string(), "gemini-2.0-flash".to_string());
        assert_eq!(client.name(), "gemini");
    }
}
