//! PostgreSQL implementation of StatsRepository
//!
//! Every grouping of one call runs inside a single `REPEATABLE READ, READ ONLY`
//! transaction, so likes, dislikes, comment counts and the viewer's reactions
//! all come from the same snapshot. One statement per grouping, filtered with
//! `= ANY($n)`, keeps the round-trip count independent of the batch size.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use forum_core::traits::{RepoResult, StatsGroupings, StatsRepository};
use forum_core::value_objects::{Snowflake, TargetKind};

use crate::mappers::polarity_by_target;
use crate::models::{GroupCountModel, ViewerReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of StatsRepository
#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    /// Create a new PgStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn count_reactions(
    conn: &mut PgConnection,
    kind: TargetKind,
    ids: &[i64],
    is_like: bool,
) -> RepoResult<HashMap<Snowflake, i64>> {
    let column = kind.column();
    let rows = sqlx::query_as::<_, GroupCountModel>(&format!(
        r#"
        SELECT {column} AS target_id, COUNT(*) AS count
        FROM reactions
        WHERE {column} = ANY($1) AND is_like = $2
        GROUP BY {column}
        "#
    ))
    .bind(ids)
    .bind(is_like)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(into_counts(rows))
}

async fn count_comments(
    conn: &mut PgConnection,
    post_ids: &[i64],
) -> RepoResult<HashMap<Snowflake, i64>> {
    let rows = sqlx::query_as::<_, GroupCountModel>(
        r#"
        SELECT post_id AS target_id, COUNT(*) AS count
        FROM comments
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(into_counts(rows))
}

async fn viewer_reactions(
    conn: &mut PgConnection,
    kind: TargetKind,
    ids: &[i64],
    viewer: Snowflake,
) -> RepoResult<Vec<ViewerReactionModel>> {
    let column = kind.column();
    sqlx::query_as::<_, ViewerReactionModel>(&format!(
        r#"
        SELECT {column} AS target_id, is_like
        FROM reactions
        WHERE user_id = $1 AND {column} = ANY($2)
        "#
    ))
    .bind(viewer.into_inner())
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)
}

fn into_counts(rows: Vec<GroupCountModel>) -> HashMap<Snowflake, i64> {
    rows.into_iter()
        .map(|row| (Snowflake::new(row.target_id), row.count))
        .collect()
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    #[instrument(skip(self, ids), fields(batch = ids.len()))]
    async fn load_groupings(
        &self,
        kind: TargetKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> RepoResult<StatsGroupings> {
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let likes = count_reactions(&mut tx, kind, &ids, true).await?;
        let dislikes = count_reactions(&mut tx, kind, &ids, false).await?;
        let comments = match kind {
            TargetKind::Post => count_comments(&mut tx, &ids).await?,
            TargetKind::Comment => HashMap::new(),
        };
        let viewer = match viewer {
            Some(viewer) => polarity_by_target(viewer_reactions(&mut tx, kind, &ids, viewer).await?),
            None => HashMap::new(),
        };

        tx.commit().await.map_err(map_db_error)?;
        debug!(
            liked = likes.len(),
            disliked = dislikes.len(),
            commented = comments.len(),
            "Loaded stats groupings"
        );

        Ok(StatsGroupings {
            likes,
            dislikes,
            comments,
            viewer,
        })
    }
}
