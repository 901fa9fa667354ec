//! Reaction target - the post or comment a reaction applies to

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

use super::Snowflake;

/// Which kind of entity a reaction points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Column in the reactions table holding this kind of target
    pub const fn column(self) -> &'static str {
        match self {
            Self::Post => "post_id",
            Self::Comment => "comment_id",
        }
    }
}

/// Exactly one post or one comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ReactionTarget {
    Post(Snowflake),
    Comment(Snowflake),
}

impl ReactionTarget {
    /// Build a target from the two optional IDs a form or JSON body carries.
    ///
    /// Exactly one must be present; both or neither is a `TargetConflict`.
    pub fn from_parts(
        post_id: Option<Snowflake>,
        comment_id: Option<Snowflake>,
    ) -> Result<Self, DomainError> {
        match (post_id, comment_id) {
            (Some(post_id), None) => Ok(Self::Post(post_id)),
            (None, Some(comment_id)) => Ok(Self::Comment(comment_id)),
            _ => Err(DomainError::TargetConflict),
        }
    }

    #[inline]
    pub const fn id(&self) -> Snowflake {
        match self {
            Self::Post(id) | Self::Comment(id) => *id,
        }
    }

    #[inline]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Post(_) => TargetKind::Post,
            Self::Comment(_) => TargetKind::Comment,
        }
    }

    pub const fn post_id(&self) -> Option<Snowflake> {
        match self {
            Self::Post(id) => Some(*id),
            Self::Comment(_) => None,
        }
    }

    pub const fn comment_id(&self) -> Option<Snowflake> {
        match self {
            Self::Comment(id) => Some(*id),
            Self::Post(_) => None,
        }
    }
}

impl fmt::Display for ReactionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post(id) => write!(f, "post:{id}"),
            Self::Comment(id) => write!(f, "comment:{id}"),
        }
    }
}
