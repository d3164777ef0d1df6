//! Error types for the collaborator clients

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to a collaborator
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// LLM call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Collaborator did not answer in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The request to the collaborator was unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NewsError {
    /// Map a non-success HTTP response into an error
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return NewsError::RateLimited;
        }
        let body = response.text().await.unwrap_or_default();
        NewsError::ApiError {
            status: status.as_u16(),
            message: body,
        }
    }
}
