//! Cluster data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::item::{NormalizedItem, SourceKind};
use crate::topic::Topic;

/// Identity of a cluster bucket within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterKey {
    /// A shared taxonomy bucket
    Topic(Topic),
    /// A singleton bucket for the generated article at this index
    Generated(usize),
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterKey::Topic(topic) => f.write_str(topic.key()),
            ClusterKey::Generated(index) => write!(f, "generated-article-{}", index),
        }
    }
}

impl Serialize for ClusterKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One distinct origin contributing to a cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// A group of same-topic items merged into one display unit
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    /// Unique within a run, not across runs
    pub id: String,
    pub topic_key: ClusterKey,
    pub topic_label: String,
    pub headline: String,
    /// Summary of the item that supplied the headline
    pub main_summary: String,
    pub combined_summary: String,
    pub representative_image: String,
    /// Timestamp of the item that opened the cluster
    pub first_seen: DateTime<Utc>,
    /// Max timestamp among members. Never decreases.
    pub most_recent_timestamp: DateTime<Utc>,
    pub item_count: usize,
    /// Deduplicated by label, insertion order
    pub sources: Vec<SourceRef>,
    /// Insertion order, not sorted
    pub items: Vec<NormalizedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ago: Option<String>,
}

impl Cluster {
    /// Open an empty cluster. `image` None means a seeded placeholder.
    pub fn open(
        id: String,
        topic_key: ClusterKey,
        topic_label: impl Into<String>,
        image: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let representative_image = image
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_image(&id));
        Self {
            id,
            topic_key,
            topic_label: topic_label.into(),
            headline: String::new(),
            main_summary: String::new(),
            combined_summary: String::new(),
            representative_image,
            first_seen: timestamp,
            most_recent_timestamp: timestamp,
            item_count: 0,
            sources: Vec::new(),
            items: Vec::new(),
            time_ago: None,
        }
    }

    /// Append an item, updating count, recency and sources
    pub fn push(&mut self, item: NormalizedItem) {
        if item.timestamp > self.most_recent_timestamp {
            self.most_recent_timestamp = item.timestamp;
        }

        if !self.sources.iter().any(|s| s.label == item.source_label) {
            // catalog feeds are listed without a link
            let permalink = match item.kind {
                SourceKind::Catalog => None,
                SourceKind::Social | SourceKind::Generated => {
                    item.has_permalink().then(|| item.permalink.clone())
                }
            };
            self.sources.push(SourceRef {
                kind: item.kind,
                label: item.source_label.clone(),
                permalink,
            });
        }

        self.items.push(item);
        self.item_count = self.items.len();
    }

    /// Whether a non-social item may take over the headline
    pub fn accepts_headline(&self) -> bool {
        self.headline.is_empty() || self.items.iter().all(NormalizedItem::is_social)
    }

    /// Make `item` the representative of this cluster
    pub fn promote(&mut self, item: &NormalizedItem) {
        self.headline = item.title.clone();
        self.main_summary = item.content.clone();
        if let Some(image) = &item.image_url {
            self.representative_image = image.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Deterministic placeholder image for a cluster id
pub fn placeholder_image(seed: &str) -> String {
    format!(
        "https://picsum.photos/seed/{}/800/450",
        sanitize_seed(seed)
    )
}

fn sanitize_seed(seed: &str) -> String {
    seed.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Relative age label: "3d ago", "5h ago" or "Just now"
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else {
        "Just now".to_string()
    }
}
