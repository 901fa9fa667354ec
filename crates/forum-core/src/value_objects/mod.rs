//! Value objects - immutable types that represent domain concepts

mod category_name;
mod polarity;
mod snowflake;
mod target;

pub use category_name::CategoryName;
pub use polarity::Polarity;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use target::{ReactionTarget, TargetKind};
