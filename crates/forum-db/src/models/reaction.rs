//! Reaction database models

use sqlx::FromRow;

/// The existing reaction a toggle decides against
#[derive(Debug, Clone, FromRow)]
pub struct ReactionStateModel {
    pub id: i64,
    pub is_like: bool,
}

/// One row of a grouped count (likes, dislikes or comments per target)
#[derive(Debug, Clone, FromRow)]
pub struct GroupCountModel {
    pub target_id: i64,
    pub count: i64,
}

/// The viewer's reaction on one target
#[derive(Debug, Clone, FromRow)]
pub struct ViewerReactionModel {
    pub target_id: i64,
    pub is_like: bool,
}
