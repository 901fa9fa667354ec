//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! (PostgreSQL or the in-memory store) provides the implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{CategorizedPost, Category, Comment, NewPost, ToggleOutcome};
use crate::error::DomainError;
use crate::value_objects::{CategoryName, Polarity, ReactionTarget, Snowflake, TargetKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

/// Which posts a listing should return.
///
/// Every listing is ordered by `created_at` descending, ties broken by
/// insertion order (earlier first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostListing {
    /// Every post
    All,
    /// Posts linked to any of the given categories (union, de-duplicated)
    InCategories(Vec<CategoryName>),
    /// Posts written by a user
    AuthoredBy(Snowflake),
    /// Posts a user currently likes
    LikedBy(Snowflake),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post and its linked categories
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CategorizedPost>>;

    /// Check whether a post exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// List posts with their full category lists
    async fn list(&self, listing: &PostListing) -> RepoResult<Vec<CategorizedPost>>;

    /// Insert a post, creating missing categories and linking them atomically
    async fn create(&self, post: &NewPost) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Check whether a comment exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// Comments on a post, oldest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Insert a comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Apply the three-way toggle atomically for one (user, target) pair.
    ///
    /// `new_id` is used only when a reaction has to be inserted.
    async fn toggle(
        &self,
        new_id: Snowflake,
        user_id: Snowflake,
        target: ReactionTarget,
        polarity: Polarity,
    ) -> RepoResult<ToggleOutcome>;

    /// Current reaction of a user on a target
    async fn find(&self, user_id: Snowflake, target: ReactionTarget)
        -> RepoResult<Option<Polarity>>;
}

// ============================================================================
// Stats Repository
// ============================================================================

/// Raw grouped rows for one batch of targets.
///
/// Maps only contain IDs that had matching rows; absent means zero (or no
/// viewer reaction). `comments` is always empty for comment targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsGroupings {
    pub likes: HashMap<Snowflake, i64>,
    pub dislikes: HashMap<Snowflake, i64>,
    pub comments: HashMap<Snowflake, i64>,
    pub viewer: HashMap<Snowflake, Polarity>,
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Load every grouping for `ids` in one consistent read.
    ///
    /// Issues one bulk query per grouping (likes, dislikes and, for posts,
    /// comment counts) plus one for the viewer's reactions when a viewer is
    /// given, independent of `ids.len()`.
    async fn load_groupings(
        &self,
        kind: TargetKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> RepoResult<StatsGroupings>;
}

// ============================================================================
// Store Health
// ============================================================================

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Cheap round trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}
