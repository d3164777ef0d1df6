//! Thin chat-completion client over an OpenAI-compatible API

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, instrument};

use crate::error::NewsError;

/// Chat client shared by the DeepSeek provider and the post filter
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatClient {
    /// Create a client for an OpenAI-compatible endpoint
    pub fn new(api_key: &str, api_base: &str, model: &str) -> Result<Self, NewsError> {
        if api_key.trim().is_empty() {
            return Err(NewsError::InvalidConfig("API key cannot be empty".to_string()));
        }

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(config),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One system + user exchange, returning the assistant text
    #[instrument(skip(self, system_prompt, user_prompt), fields(model = %self.model))]
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, NewsError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| NewsError::Llm(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| NewsError::Llm(e.to_string()))?
                    .into(),
            ])
            .temperature(temperature)
            .build()
            .map_err(|e| NewsError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| NewsError::Llm(format!("Chat API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| NewsError::ParseError("No response from chat model".to_string()))?;

        debug!("Chat model answered with {} chars", content.len());
        Ok(content)
    }
}
