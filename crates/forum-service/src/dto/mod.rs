//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreatePostRequest, FeedQuery, ReactionQuery, ToggleReactionRequest,
    UserPostsKind, UserPostsQuery,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, CategoryResponse, CommentResponse, CommentStatsResponse, HealthChecks,
    HealthResponse, PostDetailResponse, PostResponse, ReactionStateResponse, ReadinessResponse,
    StatsResponse,
};

// Re-export mapper helper structs
pub use mappers::{CommentWithStats, PostWithStats};
