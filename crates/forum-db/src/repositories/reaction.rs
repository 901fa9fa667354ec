//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use forum_core::entities::{Reaction, ToggleOutcome};
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, RepoResult};
use forum_core::value_objects::{Polarity, ReactionTarget, Snowflake};

use crate::mappers::ReactionInsert;
use crate::models::ReactionStateModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// Advisory lock key for one (user, target) pair, e.g. `42:post:7`
fn lock_key(user_id: Snowflake, target: ReactionTarget) -> String {
    format!("{user_id}:{target}")
}

fn target_missing(target: ReactionTarget) -> DomainError {
    match target {
        ReactionTarget::Post(id) => DomainError::PostNotFound(id),
        ReactionTarget::Comment(id) => DomainError::CommentNotFound(id),
    }
}

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        new_id: Snowflake,
        user_id: Snowflake,
        target: ReactionTarget,
        polarity: Polarity,
    ) -> RepoResult<ToggleOutcome> {
        let column = target.kind().column();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serialize toggles on the same pair; released at commit or rollback
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(lock_key(user_id, target))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let existing = sqlx::query_as::<_, ReactionStateModel>(&format!(
            "SELECT id, is_like FROM reactions WHERE user_id = $1 AND {column} = $2"
        ))
        .bind(user_id.into_inner())
        .bind(target.id().into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let outcome = ToggleOutcome::decide(
            existing.as_ref().map(|row| Polarity::from_is_like(row.is_like)),
            polarity,
        );

        match (outcome, existing) {
            (ToggleOutcome::Removed, Some(row)) => {
                sqlx::query("DELETE FROM reactions WHERE id = $1")
                    .bind(row.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
            (ToggleOutcome::Flipped, Some(row)) => {
                sqlx::query("UPDATE reactions SET is_like = $2 WHERE id = $1")
                    .bind(row.id)
                    .bind(polarity.is_like())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
            _ => {
                let reaction = Reaction::new(new_id, user_id, target, polarity);
                let insert = ReactionInsert::new(&reaction);

                sqlx::query(
                    r#"
                    INSERT INTO reactions (id, user_id, post_id, comment_id, is_like, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(insert.id)
                .bind(insert.user_id)
                .bind(insert.post_id)
                .bind(insert.comment_id)
                .bind(insert.is_like)
                .bind(reaction.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_foreign_key_violation(e, || target_missing(target)))?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(outcome = outcome.as_str(), "Reaction toggled");

        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: Snowflake,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        let column = target.kind().column();

        let result = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT is_like FROM reactions WHERE user_id = $1 AND {column} = $2"
        ))
        .bind(user_id.into_inner())
        .bind(target.id().into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Polarity::from_is_like))
    }
}
