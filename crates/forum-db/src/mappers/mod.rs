//! Entity to model mappers
//!
//! This module provides conversions between domain entities (forum-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod category;
mod comment;
mod post;
mod reaction;

pub use comment::CommentInsert;
pub use post::PostInsert;
pub use reaction::{polarity_by_target, ReactionInsert};
