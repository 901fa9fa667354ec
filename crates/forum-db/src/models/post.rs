//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A `posts` row joined with its aggregated category names
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `NULL` when the post has no linked category
    pub categories: Option<Vec<String>>,
}
