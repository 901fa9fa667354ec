//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and, where they carry free text, `Validate`.
//! Length maxima are enforced by the services on the normalized values, so
//! these bounds only reject requests that can never succeed.

use forum_core::{Polarity, Snowflake};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(length(min = 1, message = "Pick at least one category"))]
    pub categories: Vec<String>,
}

/// Feed query string: `?category=minecraft,general`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub category: Option<String>,
}

impl FeedQuery {
    /// Comma-separated category names, untrimmed and un-normalized
    pub fn categories(&self) -> Vec<&str> {
        self.category
            .as_deref()
            .map(|raw| raw.split(',').collect())
            .unwrap_or_default()
    }
}

/// Which posts of a user to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserPostsKind {
    /// Posts the user wrote
    #[default]
    Created,
    /// Posts the user currently likes
    Liked,
}

/// User listing query string: `?kind=liked`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPostsQuery {
    #[serde(default)]
    pub kind: UserPostsKind,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub content: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Toggle reaction request. Exactly one of `post_id` / `comment_id` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleReactionRequest {
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
    pub polarity: Polarity,
}

/// Own-reaction lookup: `?post_id=7` or `?comment_id=3`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionQuery {
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
}
