//! Generative news providers and parsing of their output

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use curator_core::{GeneratedArticle, PLACEHOLDER_URL, UNKNOWN_SOURCE, UNTITLED};

use crate::error::NewsError;

/// A service that writes news items for a free-text query
#[async_trait]
pub trait GenerativeNewsProvider: Send + Sync {
    /// Provider identity, for logs
    fn name(&self) -> &str;

    /// Items about `query`. Callers treat any error as an empty stream.
    async fn fetch_generated_articles(
        &self,
        query: &str,
    ) -> Result<Vec<GeneratedArticle>, NewsError>;
}

/// Prompt shared by every provider
pub fn news_prompt(query: &str) -> String {
    format!(
        r#"You are a news aggregator. Search for and provide the top 10 most recent and relevant news articles about: {query}.
For each article, provide:
- title: A headline for the article
- summary: A comprehensive 300-word summary of the news
- source: The news source name
- publishedDate: When it was published
- url: The source URL if available

Return the response as a valid JSON array of article objects. Focus on the most recent and breaking news.

IMPORTANT: Return ONLY the JSON array, no markdown formatting, no code blocks, just the raw JSON array starting with [ and ending with ]."#
    )
}

/// Parse provider text into articles, filling defaults for missing fields
pub fn parse_generated_articles(
    text: &str,
    now: DateTime<Utc>,
) -> Result<Vec<GeneratedArticle>, NewsError> {
    let cleaned = strip_code_fence(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| NewsError::ParseError(format!("Failed to parse news articles: {}", e)))?;

    let entries = match value {
        Value::Array(entries) => entries,
        single => vec![single],
    };

    let millis = now.timestamp_millis();
    let articles: Vec<GeneratedArticle> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                debug!("Skipping non-object article at index {}", index);
                return None;
            }
            Some(GeneratedArticle {
                id: Some(format!("gen-{}-{}", millis, index)),
                title: Some(field(entry, &["title"]).unwrap_or_else(|| UNTITLED.to_string())),
                summary: Some(field(entry, &["summary", "description"]).unwrap_or_default()),
                source_name: Some(
                    field(entry, &["source", "sourceName"])
                        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                ),
                published_at: Some(
                    field(entry, &["publishedDate", "date", "publishedAt"])
                        .unwrap_or_else(|| now.to_rfc3339()),
                ),
                url: Some(
                    field(entry, &["url", "link"]).unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
                ),
            })
        })
        .collect();

    Ok(articles)
}

/// Drop a surrounding markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// First non-empty value among `keys`. Numbers are stringified.
fn field(entry: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match entry.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
