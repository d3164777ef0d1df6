//! Collaborator clients for the news digest
//!
//! This crate provides the external services the aggregation pipeline
//! consumes:
//! - Generative news: DeepSeek (OpenAI-compatible) or Gemini with search grounding
//! - Social posts: an HTTP feed, or the built-in demo accounts
//! - Relevance filtering of social posts via an LLM
//! - Speech synthesis via Sarvam AI
//!
//! Every client reports failures as [`NewsError`]. Turning those into
//! empty or fail-open results is the caller's policy.

pub mod deepseek;
pub mod error;
pub mod gemini;
pub mod generated;
pub mod llm;
pub mod post_filter;
pub mod sarvam;
pub mod social;
pub mod types;

pub use deepseek::DeepSeekClient;
pub use error::NewsError;
pub use gemini::GeminiClient;
pub use generated::{news_prompt, parse_generated_articles, GenerativeNewsProvider};
pub use llm::ChatClient;
pub use post_filter::{LlmPostFilter, PostRelevanceFilter};
pub use sarvam::{SarvamClient, SpeechSynthesizer};
pub use social::{DemoSocialFeed, HttpSocialClient, SocialAccount, SocialPostFetcher};
