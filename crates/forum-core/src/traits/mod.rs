//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CategoryRepository, CommentRepository, PostListing, PostRepository, ReactionRepository,
    RepoResult, StatsGroupings, StatsRepository, StoreHealth,
};
