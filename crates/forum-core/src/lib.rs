//! # forum-core
//!
//! Domain layer containing entities, value objects, and repository traits for
//! the forum's interaction and feed engine.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, CategorizedPost, Comment, NewPost, Post, Reaction, StatsSnapshot, ToggleOutcome,
};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, CommentRepository, PostListing, PostRepository, ReactionRepository,
    RepoResult, StatsGroupings, StatsRepository, StoreHealth,
};
pub use value_objects::{
    CategoryName, Polarity, ReactionTarget, Snowflake, SnowflakeGenerator, SnowflakeParseError,
    TargetKind,
};
