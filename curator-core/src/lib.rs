//! Core types and aggregation pipeline for the Curious news digest
//!
//! This crate turns heterogeneous news items (generated articles, social
//! posts and static catalog articles) into topic-labeled clusters. Nothing
//! in here performs I/O: collaborators hand their results in, and the
//! pipeline hands ranked clusters back.

pub mod aggregate;
pub mod catalog;
pub mod cluster;
pub mod error;
pub mod item;
pub mod rank;
pub mod relevance;
pub mod summary;
pub mod topic;

pub use aggregate::{AggregateInput, Aggregator};
pub use catalog::{CatalogArticle, CatalogRepository};
pub use cluster::{time_ago, Cluster, ClusterKey, SourceRef};
pub use error::{CuratorError, CuratorResult};
pub use item::{
    parse_timestamp, GeneratedArticle, NormalizedItem, RawSourceItem, SocialPost, SourceKind,
    PLACEHOLDER_URL, UNKNOWN_SOURCE, UNTITLED,
};
pub use rank::rank;
pub use relevance::is_relevant;
pub use summary::synthesize;
pub use topic::{classify, Topic};
