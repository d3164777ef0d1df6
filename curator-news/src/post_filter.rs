//! LLM-backed relevance filtering of social posts

use async_trait::async_trait;
use tracing::{debug, instrument};

use curator_core::SocialPost;

use crate::error::NewsError;
use crate::llm::ChatClient;

/// Narrows social posts to those relevant to a prompt
#[async_trait]
pub trait PostRelevanceFilter: Send + Sync {
    /// Relevant posts in input order. Callers keep every post on error.
    async fn filter_posts(
        &self,
        posts: &[SocialPost],
        prompt: &str,
    ) -> Result<Vec<SocialPost>, NewsError>;
}

const SYSTEM_PROMPT: &str = r#"You filter social media posts for a news reader.
You will receive the reader's interests and a numbered list of posts.
Respond with ONLY a JSON array of the numbers of the posts that are relevant, for example [0, 2].
Respond with [] if none are relevant."#;

/// Relevance filter that asks a chat model for the matching indices
#[derive(Debug, Clone)]
pub struct LlmPostFilter {
    chat: ChatClient,
}

impl LlmPostFilter {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    fn user_prompt(posts: &[SocialPost], prompt: &str) -> String {
        let listing: Vec<String> = posts
            .iter()
            .enumerate()
            .map(|(i, post)| format!("{}: {}", i, post.text.replace('\n', " ")))
            .collect();
        format!("Interests: {}\n\nPosts:\n{}", prompt, listing.join("\n"))
    }
}

#[async_trait]
impl PostRelevanceFilter for LlmPostFilter {
    #[instrument(skip(self, posts), fields(posts = posts.len()))]
    async fn filter_posts(
        &self,
        posts: &[SocialPost],
        prompt: &str,
    ) -> Result<Vec<SocialPost>, NewsError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let answer = self
            .chat
            .complete(SYSTEM_PROMPT, &Self::user_prompt(posts, prompt), 0.0)
            .await?;

        let indices = parse_indices(&answer)?;
        let kept = select_by_indices(posts, &indices);
        debug!("Relevance filter kept {} of {} posts", kept.len(), posts.len());
        Ok(kept)
    }
}

/// Extract the JSON index array from a model answer
pub fn parse_indices(answer: &str) -> Result<Vec<usize>, NewsError> {
    let start = answer.find('[');
    let end = answer.rfind(']');
    let slice = match (start, end) {
        (Some(start), Some(end)) if start < end => &answer[start..=end],
        _ => {
            return Err(NewsError::ParseError(format!(
                "No index array in answer: {}",
                answer
            )))
        }
    };

    let values: Vec<serde_json::Value> = serde_json::from_str(slice)
        .map_err(|e| NewsError::ParseError(format!("Invalid index array: {}", e)))?;

    Ok(values
        .iter()
        .filter_map(|v| v.as_u64().map(|n| n as usize))
        .collect())
}

/// Posts at `indices`, in input order; bad and repeated indices are ignored
pub fn select_by_indices(posts: &[SocialPost], indices: &[usize]) -> Vec<SocialPost> {
    let mut keep = vec![false; posts.len()];
    for &index in indices {
        if let Some(slot) = keep.get_mut(index) {
            *slot = true;
        }
    }
    posts
        .iter()
        .zip(keep)
        .filter_map(|(post, keep)| keep.then(|| post.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(n: usize) -> Vec<SocialPost> {
        (0..n)
            .map(|i| SocialPost {
                text: format!("post {}", i),
                author_handle: "@a".to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("[0, 2]").unwrap(), vec![0, 2]);
        assert_eq!(parse_indices("Relevant: ```json\n[3]\n```").unwrap(), vec![3]);
        assert_eq!(parse_indices("[]").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_indices(r#"[1, "x", -2, 4]"#).unwrap(), vec![1, 4]);
        assert!(parse_indices("none of them").is_err());
    }

    #[test]
    fn test_select_keeps_input_order_and_ignores_bad_indices() {
        let input = posts(4);
        let kept = select_by_indices(&input, &[3, 1, 1, 9]);
        let texts: Vec<&str> = kept.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["post 1", "post 3"]);
    }

    #[test]
    fn test_user_prompt_numbers_posts() {
        let prompt = LlmPostFilter::user_prompt(&posts(2), "cricket");
        assert!(prompt.starts_with("Interests: cricket"));
        assert!(prompt.contains("0: post 0\n1: post 1"));
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let chat = ChatClient::new("sk-test", "http://127.0.0.1:9", "deepseek-chat").unwrap();
        let filter = LlmPostFilter::new(chat);
        assert!(filter.filter_posts(&[], "cricket").await.unwrap().is_empty());
    }
}
