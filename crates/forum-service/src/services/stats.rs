//! Stats aggregator
//!
//! Decorates a batch of posts (or comments) with like, dislike and comment
//! counts plus the viewer's own reaction. One call issues a fixed number of
//! grouped reads regardless of batch size: three for posts, two for comments,
//! plus one for the viewer's reactions when a viewer is given. An empty batch
//! issues none.

use std::collections::HashMap;

use forum_core::entities::StatsSnapshot;
use forum_core::traits::StatsGroupings;
use forum_core::{Snowflake, TargetKind};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Batched stats aggregator
pub struct StatsAggregator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsAggregator<'a> {
    /// Create a new StatsAggregator
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Stats for every post in `post_ids`, keyed by post ID.
    ///
    /// Every input ID gets an entry; posts nobody touched report zeros.
    #[instrument(skip(self, post_ids), fields(batch = post_ids.len()))]
    pub async fn aggregate(
        &self,
        post_ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> ServiceResult<HashMap<Snowflake, StatsSnapshot>> {
        self.load(TargetKind::Post, post_ids, viewer).await
    }

    /// Stats for every comment in `comment_ids`; `comments` is always zero
    #[instrument(skip(self, comment_ids), fields(batch = comment_ids.len()))]
    pub async fn aggregate_comments(
        &self,
        comment_ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> ServiceResult<HashMap<Snowflake, StatsSnapshot>> {
        self.load(TargetKind::Comment, comment_ids, viewer).await
    }

    async fn load(
        &self,
        kind: TargetKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> ServiceResult<HashMap<Snowflake, StatsSnapshot>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let groupings = self
            .ctx
            .within_deadline(
                "stats aggregation",
                self.ctx.stats_repo().load_groupings(kind, ids, viewer),
            )
            .await?;

        debug!(targets = ids.len(), "Aggregated stats");
        Ok(snapshots(ids, &groupings))
    }
}

/// One snapshot per input ID; IDs missing from a grouping count as zero
fn snapshots(ids: &[Snowflake], groupings: &StatsGroupings) -> HashMap<Snowflake, StatsSnapshot> {
    let count = |map: &HashMap<Snowflake, i64>, id: &Snowflake| map.get(id).copied().unwrap_or(0);

    ids.iter()
        .map(|id| {
            let snapshot = StatsSnapshot::new(
                count(&groupings.likes, id),
                count(&groupings.dislikes, id),
                count(&groupings.comments, id),
                groupings.viewer.get(id).copied(),
            );
            (*id, snapshot)
        })
        .collect()
}
