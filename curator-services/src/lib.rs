//! Digest orchestration for the news curator
//!
//! This crate wires the collaborator clients to the core pipeline: it
//! fetches the input streams concurrently under bounded timeouts,
//! applies the fail-open policies, and merges everything through the
//! aggregator.

pub mod config;
pub mod curator_service;
pub mod narration;

pub use config::{ConfigError, CuratorConfig, ProviderKind};
pub use curator_service::{CuratorService, Digest, DigestCluster, DigestRequest, ServiceTimeouts};
pub use narration::{narration_text, truncate_for_speech, SPEECH_CHAR_LIMIT};
