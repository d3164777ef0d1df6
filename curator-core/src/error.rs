//! Error types for the curator core

use thiserror::Error;

/// Curator-wide error type
#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl CuratorError {
    pub fn catalog(msg: impl Into<String>) -> Self {
        CuratorError::Catalog(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        CuratorError::Parse(msg.into())
    }
}

/// Result type alias for curator operations
pub type CuratorResult<T> = Result<T, CuratorError>;
