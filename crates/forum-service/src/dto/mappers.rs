//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Stats are computed separately, so the helper structs pair an entity with
//! its snapshot before conversion.

use forum_core::entities::{CategorizedPost, Category, Comment, StatsSnapshot};

use super::responses::{
    CategoryResponse, CommentResponse, CommentStatsResponse, PostResponse, StatsResponse,
};

// ============================================================================
// Stats Mappers
// ============================================================================

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            likes: stats.likes,
            dislikes: stats.dislikes,
            comments: stats.comments,
            viewer_reaction: stats.viewer_reaction,
        }
    }
}

impl From<StatsSnapshot> for CommentStatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            likes: stats.likes,
            dislikes: stats.dislikes,
            viewer_reaction: stats.viewer_reaction,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// A listed post, the category names to display and its stats
#[derive(Debug, Clone)]
pub struct PostWithStats {
    pub post: CategorizedPost,
    pub display_categories: Vec<String>,
    pub stats: StatsSnapshot,
}

impl From<PostWithStats> for PostResponse {
    fn from(item: PostWithStats) -> Self {
        let post = item.post.post;
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            categories: item.display_categories,
            stats: item.stats.into(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

#[derive(Debug, Clone)]
pub struct CommentWithStats {
    pub comment: Comment,
    pub stats: StatsSnapshot,
}

impl From<CommentWithStats> for CommentResponse {
    fn from(item: CommentWithStats) -> Self {
        let comment = item.comment;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
            stats: item.stats.into(),
        }
    }
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.to_string(),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self::from(&category)
    }
}
