//! Domain entities - core business objects

mod category;
mod comment;
mod post;
mod reaction;
mod stats;

pub use category::Category;
pub use comment::Comment;
pub use post::{CategorizedPost, NewPost, Post};
pub use reaction::{Reaction, ToggleOutcome};
pub use stats::StatsSnapshot;
