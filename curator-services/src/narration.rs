//! Text prepared for speech synthesis

use curator_core::Cluster;

/// Longest text sent to the speech provider, in chars
pub const SPEECH_CHAR_LIMIT: usize = 480;

const ELLIPSIS: &str = "...";

/// Headline followed by the combined summary, cut to the speech limit
pub fn narration_text(cluster: &Cluster) -> String {
    let first = cluster.items.first();

    let headline = if cluster.headline.trim().is_empty() {
        first.map(|item| item.title.as_str()).unwrap_or_default()
    } else {
        cluster.headline.as_str()
    };

    let body = if cluster.combined_summary.trim().is_empty() {
        first.map(|item| item.content.as_str()).unwrap_or_default()
    } else {
        cluster.combined_summary.as_str()
    };

    let text = match (headline.trim(), body.trim()) {
        ("", body) => body.to_string(),
        (headline, "") => headline.to_string(),
        (headline, body) => format!("{}. {}", headline, body),
    };

    truncate_for_speech(&text)
}

/// Cut `text` to [`SPEECH_CHAR_LIMIT`] chars, ending in "..." when cut
pub fn truncate_for_speech(text: &str) -> String {
    if text.chars().count() <= SPEECH_CHAR_LIMIT {
        return text.to_string();
    }
    let kept: String = text
        .chars()
        .take(SPEECH_CHAR_LIMIT - ELLIPSIS.len())
        .collect();
    format!("{}{}", kept, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use curator_core::{ClusterKey, NormalizedItem, SourceKind, Topic, PLACEHOLDER_URL};

    fn cluster(headline: &str, summary: &str) -> Cluster {
        let mut cluster = Cluster::open(
            "cluster-ai-0".to_string(),
            ClusterKey::Topic(Topic::Ai),
            Topic::Ai.label(),
            None,
            Utc::now(),
        );
        cluster.headline = headline.to_string();
        cluster.combined_summary = summary.to_string();
        cluster.push(NormalizedItem {
            id: "i1".to_string(),
            kind: SourceKind::Generated,
            title: "Item title".to_string(),
            content: "Item content".to_string(),
            source_label: "Wire".to_string(),
            author: None,
            permalink: PLACEHOLDER_URL.to_string(),
            image_url: None,
            timestamp: Utc::now(),
        });
        cluster
    }

    #[test]
    fn test_headline_and_summary() {
        assert_eq!(
            narration_text(&cluster("Big news", "It happened today.")),
            "Big news. It happened today."
        );
    }

    #[test]
    fn test_headline_kept_verbatim() {
        assert_eq!(
            narration_text(&cluster("Rates held.", "Markets shrugged")),
            "Rates held.. Markets shrugged"
        );
    }

    #[test]
    fn test_falls_back_to_first_item() {
        assert_eq!(narration_text(&cluster("", "")), "Item title. Item content");
    }

    #[test]
    fn test_long_text_truncated() {
        let text = narration_text(&cluster("Headline", &"word ".repeat(200)));
        assert_eq!(text.chars().count(), SPEECH_CHAR_LIMIT);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let text = "é".repeat(600);
        let cut = truncate_for_speech(&text);
        assert_eq!(cut.chars().count(), 480);
        assert!(cut.starts_with("ééé"));
        assert_eq!(truncate_for_speech("short"), "short");
        assert_eq!(truncate_for_speech(&"x".repeat(480)), "x".repeat(480));
    }
}
