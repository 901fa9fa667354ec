//! Reaction service
//!
//! Handles likes and dislikes on posts and comments. A user holds at most one
//! reaction per target; a toggle creates it, removes it (same polarity) or
//! flips it (opposite polarity).

use forum_core::{DomainError, Polarity, ReactionTarget, Snowflake};
use tracing::{info, instrument};

use crate::dto::ReactionStateResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a reaction on a post or comment
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: Snowflake,
        target: ReactionTarget,
        polarity: Polarity,
    ) -> ServiceResult<()> {
        self.ensure_target_exists(target).await?;

        let outcome = self
            .ctx
            .reaction_repo()
            .toggle(self.ctx.generate_id(), user_id, target, polarity)
            .await?;

        info!(
            user_id = %user_id,
            target = %target,
            polarity = %polarity,
            outcome = outcome.as_str(),
            "Reaction toggled"
        );

        Ok(())
    }

    /// Toggle from the raw pair a request carries.
    ///
    /// Exactly one of `post_id` / `comment_id` must be set, otherwise
    /// `TargetConflict`.
    pub async fn toggle_parts(
        &self,
        user_id: Snowflake,
        post_id: Option<Snowflake>,
        comment_id: Option<Snowflake>,
        polarity: Polarity,
    ) -> ServiceResult<()> {
        let target = ReactionTarget::from_parts(post_id, comment_id)?;
        self.toggle(user_id, target, polarity).await
    }

    /// Current reaction of a user on a target
    #[instrument(skip(self))]
    pub async fn read(
        &self,
        user_id: Snowflake,
        target: ReactionTarget,
    ) -> ServiceResult<Option<Polarity>> {
        Ok(self.ctx.reaction_repo().find(user_id, target).await?)
    }

    /// Read from the raw pair a request carries
    pub async fn read_parts(
        &self,
        user_id: Snowflake,
        post_id: Option<Snowflake>,
        comment_id: Option<Snowflake>,
    ) -> ServiceResult<ReactionStateResponse> {
        let target = ReactionTarget::from_parts(post_id, comment_id)?;
        let polarity = self.read(user_id, target).await?;
        Ok(ReactionStateResponse { target, polarity })
    }

    async fn ensure_target_exists(&self, target: ReactionTarget) -> ServiceResult<()> {
        match target {
            ReactionTarget::Post(id) => {
                if !self.ctx.post_repo().exists(id).await? {
                    return Err(DomainError::PostNotFound(id).into());
                }
            }
            ReactionTarget::Comment(id) => {
                if !self.ctx.comment_repo().exists(id).await? {
                    return Err(DomainError::CommentNotFound(id).into());
                }
            }
        }
        Ok(())
    }
}
