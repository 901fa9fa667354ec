//! Category entity <-> model mapper

use forum_core::entities::Category;
use forum_core::error::DomainError;
use forum_core::value_objects::{CategoryName, Snowflake};

use crate::models::CategoryModel;

/// Stored names are normalized by a CHECK constraint, so a failure here means
/// the table was written around the schema.
impl TryFrom<CategoryModel> for Category {
    type Error = DomainError;

    fn try_from(model: CategoryModel) -> Result<Self, Self::Error> {
        let name = CategoryName::try_from(model.name).map_err(DomainError::InternalError)?;
        Ok(Category {
            id: Snowflake::new(model.id),
            name,
        })
    }
}
