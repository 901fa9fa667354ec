//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod comment;
mod post;
mod reaction;

pub use category::CategoryModel;
pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::{GroupCountModel, ReactionStateModel, ViewerReactionModel};
