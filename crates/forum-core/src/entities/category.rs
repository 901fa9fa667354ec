//! Category entity

use crate::value_objects::{CategoryName, Snowflake};

/// A category, created lazily on first use and never deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub name: CategoryName,
}
