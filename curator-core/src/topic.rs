//! Fixed topic taxonomy and keyword classifier

use std::fmt;

use serde::{Deserialize, Serialize};

/// A topic from the fixed taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Ai,
    Cricket,
    Geopolitics,
    Health,
    Sports,
    Tech,
    /// Reserved bucket for text that matches no keyword
    General,
}

const AI_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "gpt",
    "deepseek",
    "llama",
    "openai",
    "anthropic",
    "claude",
    "machine learning",
    "deep learning",
    "neural",
    "model",
    "chip",
    "semiconductor",
    "language model",
    "llm",
    "chatgpt",
    "deepmind",
    "reasoning",
    "multimodal",
];

const CRICKET_KEYWORDS: &[&str] = &[
    "cricket",
    "ipl",
    "test",
    "t20",
    "odi",
    "kohli",
    "batting",
    "bowling",
    "wicket",
    "runs",
    "innings",
    "icc",
    "world cup",
    "bcci",
    "century",
    "six",
    "four",
];

const GEOPOLITICS_KEYWORDS: &[&str] = &[
    "geopolitics",
    "china",
    "us",
    "usa",
    "trade",
    "sanctions",
    "export",
    "import",
    "policy",
    "government",
    "war",
    "diplomacy",
    "eu",
    "mercosur",
    "tariff",
    "tensions",
    "bilateral",
    "summit",
    "foreign",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "health",
    "who",
    "medical",
    "cancer",
    "diagnosis",
    "treatment",
    "drug",
    "fda",
    "vaccine",
    "hospital",
    "disease",
    "healthcare",
    "clinical",
    "patient",
    "therapy",
];

const SPORTS_KEYWORDS: &[&str] = &[
    "sports",
    "football",
    "nfl",
    "tennis",
    "basketball",
    "soccer",
    "champions",
    "world cup",
    "playoff",
    "championship",
    "match",
    "game",
    "score",
    "player",
    "team",
];

const TECH_KEYWORDS: &[&str] = &[
    "tech",
    "microsoft",
    "google",
    "meta",
    "apple",
    "startup",
    "funding",
    "investment",
    "ipo",
    "valuation",
    "billion",
    "data center",
    "cloud",
    "infrastructure",
    "software",
];

impl Topic {
    /// Taxonomy in declaration order. Earlier entries win classification ties.
    pub const TAXONOMY: [Topic; 6] = [
        Topic::Ai,
        Topic::Cricket,
        Topic::Geopolitics,
        Topic::Health,
        Topic::Sports,
        Topic::Tech,
    ];

    /// Lowercase keywords matched as substrings
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Ai => AI_KEYWORDS,
            Topic::Cricket => CRICKET_KEYWORDS,
            Topic::Geopolitics => GEOPOLITICS_KEYWORDS,
            Topic::Health => HEALTH_KEYWORDS,
            Topic::Sports => SPORTS_KEYWORDS,
            Topic::Tech => TECH_KEYWORDS,
            Topic::General => &[],
        }
    }

    /// Stable key used in cluster ids and JSON
    pub fn key(self) -> &'static str {
        match self {
            Topic::Ai => "ai",
            Topic::Cricket => "cricket",
            Topic::Geopolitics => "geopolitics",
            Topic::Health => "health",
            Topic::Sports => "sports",
            Topic::Tech => "tech",
            Topic::General => "general",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Topic::Ai => "AI & Technology",
            Topic::Cricket => "Cricket",
            Topic::Geopolitics => "Geopolitics",
            Topic::Health => "Health & Medicine",
            Topic::Sports => "Sports",
            Topic::Tech => "Tech & Business",
            Topic::General => "General News",
        }
    }

    /// Count how many of this topic's keywords occur in already-lowercased text
    fn score(self, lower_text: &str) -> usize {
        self.keywords()
            .iter()
            .filter(|kw| lower_text.contains(*kw))
            .count()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Classify free text into a taxonomy topic by keyword count.
///
/// Only a strictly higher count replaces the current best, so the first
/// topic to reach the maximum keeps it. Zero matches everywhere yields
/// [`Topic::General`].
pub fn classify(text: &str) -> Topic {
    let lower = text.to_lowercase();
    let mut best = Topic::General;
    let mut max_count = 0;

    for topic in Topic::TAXONOMY {
        let count = topic.score(&lower);
        if count > max_count {
            max_count = count;
            best = topic;
        }
    }

    best
}
