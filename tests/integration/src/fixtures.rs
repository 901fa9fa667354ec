//! Test fixtures: request bodies and the response shapes tests read back

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}

impl CreatePost {
    pub fn in_categories(categories: &[&str]) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Post {suffix}"),
            content: format!("Body of post {suffix}"),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Add comment request
#[derive(Debug, Serialize)]
pub struct CreateComment {
    pub content: String,
}

/// Toggle reaction request
#[derive(Debug, Serialize)]
pub struct ToggleReaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    pub polarity: String,
}

impl ToggleReaction {
    pub fn post(post_id: &str, polarity: &str) -> Self {
        Self {
            post_id: Some(post_id.to_string()),
            comment_id: None,
            polarity: polarity.to_string(),
        }
    }

    pub fn comment(comment_id: &str, polarity: &str) -> Self {
        Self {
            post_id: None,
            comment_id: Some(comment_id.to_string()),
            polarity: polarity.to_string(),
        }
    }
}

/// `{ "data": [...] }` list envelope
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub likes: i64,
    pub dislikes: i64,
    pub comments: i64,
    pub viewer_reaction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostView {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub categories: Vec<String>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommentStats {
    pub likes: i64,
    pub dislikes: i64,
    pub viewer_reaction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub stats: CommentStats,
}

#[derive(Debug, Deserialize)]
pub struct PostDetail {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionTargetView {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReactionState {
    pub target: ReactionTargetView,
    pub polarity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
