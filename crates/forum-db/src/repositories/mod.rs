//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod comment;
mod error;
mod health;
mod post;
mod reaction;
mod stats;

pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use health::PgStoreHealth;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use stats::PgStatsRepository;
