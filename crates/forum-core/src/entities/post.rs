//! Post entity

use chrono::{DateTime, Utc};

use crate::value_objects::{CategoryName, Snowflake};

/// A forum post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A post to be persisted together with its category links
#[derive(Debug, Clone)]
pub struct NewPost {
    pub post: Post,
    pub categories: Vec<CategoryName>,
}

/// A listed post with the category names linked to it at query time.
///
/// `categories` holds exactly what storage reports, sorted by name; an
/// unlinked post has an empty list here and the display default is applied
/// on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedPost {
    pub post: Post,
    pub categories: Vec<String>,
}

impl CategorizedPost {
    #[inline]
    pub fn id(&self) -> Snowflake {
        self.post.id
    }

    /// Category names to show, falling back to `default` for an unlinked post
    pub fn display_categories(&self, default: &str) -> Vec<String> {
        if self.categories.is_empty() {
            vec![default.to_string()]
        } else {
            self.categories.clone()
        }
    }
}
