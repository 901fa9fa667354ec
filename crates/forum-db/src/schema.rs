//! Schema bootstrap
//!
//! The forum has a single, additive schema. It is applied at startup with
//! `CREATE ... IF NOT EXISTS` statements, so running it twice is a no-op.

use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Create any missing tables, constraints and indexes
pub async fn apply(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema applied");
    Ok(())
}
