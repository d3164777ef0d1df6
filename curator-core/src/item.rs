//! Raw source items and the normalized shape they collapse into

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::catalog::CatalogArticle;

/// Substituted for any missing URL
pub const PLACEHOLDER_URL: &str = "#";
/// Substituted for a missing source name
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
/// Substituted for a missing title
pub const UNTITLED: &str = "Untitled";

/// Social post titles keep this many characters of the post text
const SOCIAL_TITLE_CHARS: usize = 60;

/// Where a news item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Produced by the generative text provider
    Generated,
    /// A post from the social feed
    Social,
    /// An article from the static catalog
    Catalog,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Generated => "generated",
            SourceKind::Social => "social",
            SourceKind::Catalog => "catalog",
        }
    }
}

/// A news item as returned by the generative provider.
///
/// Every field is optional because provider output is not trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub source_name: Option<String>,
    /// Publication date as reported by the provider (unparsed)
    pub published_at: Option<String>,
    pub url: Option<String>,
}

/// A short post fetched from the social feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub author_name: Option<String>,
    pub author_handle: String,
    pub author_avatar_url: Option<String>,
    pub posted_at: Option<String>,
    pub permalink_url: Option<String>,
}

/// Any of the three source shapes, before normalization
#[derive(Debug, Clone, Copy)]
pub enum RawSourceItem<'a> {
    Generated(&'a GeneratedArticle),
    Social(&'a SocialPost),
    Catalog(&'a CatalogArticle),
}

impl RawSourceItem<'_> {
    pub fn kind(&self) -> SourceKind {
        match self {
            RawSourceItem::Generated(_) => SourceKind::Generated,
            RawSourceItem::Social(_) => SourceKind::Social,
            RawSourceItem::Catalog(_) => SourceKind::Catalog,
        }
    }

    /// Convert into the common item shape, using `now` for missing dates
    pub fn normalize(self, now: DateTime<Utc>) -> NormalizedItem {
        match self {
            RawSourceItem::Generated(article) => NormalizedItem::from_generated(article, now),
            RawSourceItem::Social(post) => NormalizedItem::from_social(post, now),
            RawSourceItem::Catalog(article) => NormalizedItem::from_catalog(article, now),
        }
    }
}

/// The common shape every source item is converted into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Stable identifier (source id, or a hash of kind + permalink + title)
    pub id: String,
    pub kind: SourceKind,
    pub title: String,
    /// Body text used for classification and display. Never empty.
    pub content: String,
    /// Site name, or "@handle" for social posts
    pub source_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Link to the original, or [`PLACEHOLDER_URL`]
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NormalizedItem {
    pub fn from_generated(article: &GeneratedArticle, now: DateTime<Utc>) -> Self {
        let title = non_empty(article.title.as_deref()).unwrap_or(UNTITLED).to_string();
        let content = non_empty(article.summary.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());
        let permalink = non_empty(article.url.as_deref())
            .unwrap_or(PLACEHOLDER_URL)
            .to_string();
        let id = non_empty(article.id.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| generate_stable_id(SourceKind::Generated, &permalink, &title));

        Self {
            id,
            kind: SourceKind::Generated,
            title,
            content,
            source_label: non_empty(article.source_name.as_deref())
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            author: None,
            permalink,
            image_url: None,
            timestamp: parse_timestamp(article.published_at.as_deref(), now),
        }
    }

    pub fn from_social(post: &SocialPost, now: DateTime<Utc>) -> Self {
        let text = post.text.trim();
        let title = if text.is_empty() {
            UNTITLED.to_string()
        } else {
            let head: String = post.text.chars().take(SOCIAL_TITLE_CHARS).collect();
            format!("{}...", head)
        };
        let content = if text.is_empty() {
            title.clone()
        } else {
            post.text.clone()
        };
        let permalink = non_empty(post.permalink_url.as_deref())
            .unwrap_or(PLACEHOLDER_URL)
            .to_string();
        let id = non_empty(post.id.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| generate_stable_id(SourceKind::Social, &permalink, &content));

        Self {
            id,
            kind: SourceKind::Social,
            title,
            content,
            source_label: handle_label(&post.author_handle),
            author: non_empty(post.author_name.as_deref()).map(str::to_string),
            permalink,
            image_url: None,
            timestamp: parse_timestamp(post.posted_at.as_deref(), now),
        }
    }

    pub fn from_catalog(article: &CatalogArticle, now: DateTime<Utc>) -> Self {
        let title = non_empty(Some(article.title.as_str())).unwrap_or(UNTITLED).to_string();
        let content = non_empty(Some(article.summary.as_str()))
            .or_else(|| non_empty(article.full_text.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());
        let permalink = non_empty(article.source_url.as_deref())
            .unwrap_or(PLACEHOLDER_URL)
            .to_string();
        let id = non_empty(Some(article.id.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| generate_stable_id(SourceKind::Catalog, &permalink, &title));

        Self {
            id,
            kind: SourceKind::Catalog,
            title,
            content,
            source_label: non_empty(Some(article.source_name.as_str()))
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            author: non_empty(article.author.as_deref()).map(str::to_string),
            permalink,
            image_url: non_empty(article.image_url.as_deref()).map(str::to_string),
            timestamp: parse_timestamp(article.published_at.as_deref(), now),
        }
    }

    pub fn is_social(&self) -> bool {
        self.kind == SourceKind::Social
    }

    pub fn has_permalink(&self) -> bool {
        self.permalink != PLACEHOLDER_URL
    }
}

/// Naive datetime layouts, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, read as midnight UTC
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%Y/%m/%d",
];

/// Parse a reported date, falling back to `now` when absent or unreadable.
///
/// Accepts RFC 3339, RFC 2822, naive ISO datetimes (with or without
/// fractional seconds, 'T' or space separated) and spelled-out dates
/// such as "January 10, 2026" or "10 Jan 2026".
pub fn parse_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = non_empty(raw) else {
        return now;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return naive.and_utc();
    }
    if let Some(naive) = NAIVE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return naive.and_utc();
    }

    debug!("Unparseable timestamp '{}', using current time", raw);
    now
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Social sources are labeled by handle, always with a leading '@'
fn handle_label(handle: &str) -> String {
    let handle = handle.trim();
    if handle.is_empty() {
        UNKNOWN_SOURCE.to_string()
    } else if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{}", handle)
    }
}

/// Hash-based id for items whose source did not provide one
fn generate_stable_id(kind: SourceKind, permalink: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(permalink.as_bytes());
    hasher.update(text.as_bytes());
    let hash = hasher.finalize();
    format!("{}_{}", kind.as_str(), &hex::encode(hash)[..16])
}
