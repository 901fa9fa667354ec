//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! call, so constructing one is free.

pub mod category;
pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
pub mod post;
pub mod reaction;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use category::{CategoryFilter, CategoryResolver};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use stats::StatsAggregator;
