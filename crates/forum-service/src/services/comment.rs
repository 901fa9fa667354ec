//! Comment service

use chrono::Utc;
use forum_core::entities::{Comment, StatsSnapshot};
use forum_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithStats};

use super::context::ServiceContext;
use super::error::ServiceResult;

const COMMENT_MAX_CHARS: usize = 100;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to an existing post
    #[instrument(skip(self, content))]
    pub async fn add_comment(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::ValidationError("comment cannot be empty".to_string()).into());
        }
        if content.chars().count() > COMMENT_MAX_CHARS {
            return Err(DomainError::ContentTooLong {
                max: COMMENT_MAX_CHARS,
            }
            .into());
        }

        if !self.ctx.post_repo().exists(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let comment = Comment {
            id: self.ctx.generate_id(),
            post_id,
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            post_id = %post_id,
            author_id = %author_id,
            "Comment added"
        );

        Ok(CommentResponse::from(CommentWithStats {
            comment,
            stats: StatsSnapshot::default(),
        }))
    }
}
