//! Derived per-item statistics

use crate::value_objects::Polarity;

/// Like / dislike / comment counts plus the viewer's own reaction.
///
/// Computed on demand, never persisted. `viewer_reaction` is `None` both for
/// guests and for viewers who have not reacted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub likes: i64,
    pub dislikes: i64,
    pub comments: i64,
    pub viewer_reaction: Option<Polarity>,
}

impl StatsSnapshot {
    pub fn new(likes: i64, dislikes: i64, comments: i64, viewer_reaction: Option<Polarity>) -> Self {
        Self {
            likes,
            dislikes,
            comments,
            viewer_reaction,
        }
    }
}
