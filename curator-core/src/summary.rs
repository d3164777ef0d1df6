//! Multi-source summary synthesis

use std::collections::HashSet;

use crate::item::NormalizedItem;

/// At most this many items contribute to a combined summary
const MAX_CONTRIBUTORS: usize = 3;
/// Sentences taken from each contributor
const SENTENCES_PER_ITEM: usize = 2;
/// Fragments this short (in chars) or shorter are not sentences
const MIN_SENTENCE_CHARS: usize = 20;
/// Length of the lowercase prefix compared for near-duplicates
const DEDUP_PREFIX_CHARS: usize = 50;

/// Merge a cluster's items into one non-redundant summary.
///
/// A single item is returned verbatim. Otherwise articles and generated
/// items go before social posts, the first two sentences of up to three
/// items are kept, and groups sharing a 50-char lowercase prefix are
/// dropped after the first.
pub fn synthesize(items: &[NormalizedItem]) -> String {
    match items {
        [] => return String::new(),
        [only] => return only.content.clone(),
        _ => {}
    }

    let ordered: Vec<&NormalizedItem> = items
        .iter()
        .filter(|item| !item.is_social())
        .chain(items.iter().filter(|item| item.is_social()))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut parts: Vec<String> = Vec::new();

    for item in ordered.iter().take(MAX_CONTRIBUTORS) {
        let key_point = key_point(&item.content);
        if key_point.is_empty() {
            continue;
        }

        let prefix: String = key_point
            .to_lowercase()
            .chars()
            .take(DEDUP_PREFIX_CHARS)
            .collect();
        if seen.insert(prefix) {
            parts.push(key_point);
        }
    }

    if parts.is_empty() {
        // nothing sentence-like; keep the best item's text
        return ordered
            .iter()
            .map(|item| item.content.trim())
            .find(|content| !content.is_empty())
            .unwrap_or_default()
            .to_string();
    }

    format!("{}.", parts.join(". "))
}

/// First sentences of `content`, joined with ". "
fn key_point(content: &str) -> String {
    content
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(SENTENCES_PER_ITEM)
        .collect::<Vec<_>>()
        .join(". ")
}
