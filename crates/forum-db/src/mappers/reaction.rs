//! Reaction entity <-> model mapper

use std::collections::HashMap;

use forum_core::entities::Reaction;
use forum_core::value_objects::{Polarity, Snowflake};

use crate::models::ViewerReactionModel;

/// Reaction values for database insertion.
///
/// Exactly one of `post_id` / `comment_id` is set, matching the table's
/// CHECK constraint.
pub struct ReactionInsert {
    pub id: i64,
    pub user_id: i64,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_like: bool,
}

impl ReactionInsert {
    pub fn new(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            post_id: reaction.target.post_id().map(Snowflake::into_inner),
            comment_id: reaction.target.comment_id().map(Snowflake::into_inner),
            is_like: reaction.polarity.is_like(),
        }
    }
}

/// Index viewer reaction rows by target
pub fn polarity_by_target(rows: Vec<ViewerReactionModel>) -> HashMap<Snowflake, Polarity> {
    rows.into_iter()
        .map(|row| (Snowflake::new(row.target_id), Polarity::from_is_like(row.is_like)))
        .collect()
}
