//! # forum-service
//!
//! Application layer: the interaction and feed aggregation engine plus the
//! authoring paths that feed it.
//!
//! - [`ReactionService`]: three-way like/dislike toggle and reads
//! - [`StatsAggregator`]: batched per-post and per-comment statistics
//! - [`CategoryResolver`]: category normalization and feed filtering
//! - [`FeedService`]: decorated feeds, user listings and post detail
//! - [`PostService`] / [`CommentService`]: authoring

pub mod dto;
pub mod services;

pub use services::{
    CategoryFilter, CategoryResolver, CommentService, FeedService, PostService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, StatsAggregator,
};
