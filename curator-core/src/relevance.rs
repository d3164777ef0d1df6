//! Lexical relevance check for catalog articles

use crate::topic::{classify, Topic};

/// Prompt words must be longer than this (in chars) to count
const MIN_PROMPT_WORD_CHARS: usize = 3;

/// Decide whether `item_text` matches the user's prompt.
///
/// A shared non-general topic is enough on its own. Otherwise any prompt
/// word longer than three characters appearing anywhere in the text
/// counts as a match.
pub fn is_relevant(item_text: &str, user_prompt: &str) -> bool {
    let prompt_topic = classify(user_prompt);
    if prompt_topic != Topic::General && prompt_topic == classify(item_text) {
        return true;
    }

    let lower_text = item_text.to_lowercase();
    user_prompt
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_PROMPT_WORD_CHARS)
        .any(|word| lower_text.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_match_is_enough() {
        // no shared words, both classify as cricket
        assert!(is_relevant("Wicket and innings report", "cricket"));
    }

    #[test]
    fn test_word_match() {
        assert!(is_relevant("Mercedes unveils a new electric sedan", "electric cars"));
    }

    #[test]
    fn test_short_words_ignored() {
        assert!(!is_relevant("The new van", "van new"));
    }

    #[test]
    fn test_word_match_is_substring() {
        // "bank" appears inside "banking"
        assert!(is_relevant("Online banking outage", "bank"));
    }

    #[test]
    fn test_general_prompt_needs_words() {
        assert!(!is_relevant("Zxq plorb", "qwerty"));
    }

    #[test]
    fn test_different_topics_without_words() {
        assert!(!is_relevant("FDA approves vaccine", "cricket"));
    }
}
