//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A comment on a post. Read-only to the interaction engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
