//! Post entity <-> model mapper

use forum_core::entities::{CategorizedPost, Post};
use forum_core::value_objects::Snowflake;

use crate::models::PostModel;

/// Convert PostModel to a post with its category names
impl From<PostModel> for CategorizedPost {
    fn from(model: PostModel) -> Self {
        CategorizedPost {
            post: Post {
                id: Snowflake::new(model.id),
                author_id: Snowflake::new(model.author_id),
                title: model.title,
                content: model.content,
                created_at: model.created_at,
            },
            categories: model.categories.unwrap_or_default(),
        }
    }
}

/// Post values for database insertion
pub struct PostInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            author_id: post.author_id.into_inner(),
            title: &post.title,
            content: &post.content,
        }
    }
}
