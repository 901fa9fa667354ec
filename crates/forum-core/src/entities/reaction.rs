//! Reaction entity - one user's like or dislike on one post or comment

use chrono::{DateTime, Utc};

use crate::value_objects::{Polarity, ReactionTarget, Snowflake};

/// Reaction entity. At most one exists per (user, target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub target: ReactionTarget,
    pub polarity: Polarity,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        target: ReactionTarget,
        polarity: Polarity,
    ) -> Self {
        Self {
            id,
            user_id,
            target,
            polarity,
            created_at: Utc::now(),
        }
    }
}

/// Which edge of the three-way toggle a request took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No reaction existed; one was inserted
    Created,
    /// Same polarity existed; it was deleted
    Removed,
    /// Opposite polarity existed; it was updated in place
    Flipped,
}

impl ToggleOutcome {
    /// Decide the transition from the existing polarity, if any
    pub fn decide(existing: Option<Polarity>, requested: Polarity) -> Self {
        match existing {
            None => Self::Created,
            Some(current) if current == requested => Self::Removed,
            Some(_) => Self::Flipped,
        }
    }

    /// Polarity left in place after the transition
    pub fn resulting(self, requested: Polarity) -> Option<Polarity> {
        match self {
            Self::Created | Self::Flipped => Some(requested),
            Self::Removed => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Removed => "removed",
            Self::Flipped => "flipped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_three_way() {
        assert_eq!(ToggleOutcome::decide(None, Polarity::Like), ToggleOutcome::Created);
        assert_eq!(
            ToggleOutcome::decide(Some(Polarity::Like), Polarity::Like),
            ToggleOutcome::Removed
        );
        assert_eq!(
            ToggleOutcome::decide(Some(Polarity::Like), Polarity::Dislike),
            ToggleOutcome::Flipped
        );
    }

    #[test]
    fn test_resulting_state() {
        assert_eq!(ToggleOutcome::Created.resulting(Polarity::Dislike), Some(Polarity::Dislike));
        assert_eq!(ToggleOutcome::Removed.resulting(Polarity::Like), None);
        assert_eq!(ToggleOutcome::Flipped.resulting(Polarity::Like), Some(Polarity::Like));
    }

    #[test]
    fn test_reaction_creation() {
        let reaction = Reaction::new(
            Snowflake::new(1),
            Snowflake::new(100),
            ReactionTarget::Post(Snowflake::new(7)),
            Polarity::Like,
        );
        assert_eq!(reaction.user_id, Snowflake::new(100));
        assert_eq!(reaction.target.id(), Snowflake::new(7));
        assert_eq!(reaction.polarity, Polarity::Like);
    }
}
