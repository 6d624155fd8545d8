//! Schema definitions and migration utilities.
//!
//! The SQL schema is embedded in the binary so a fresh database can be
//! brought up by the server itself, without a separate migration step.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the core schema (001_schema.sql).
pub const SCHEMA_MIGRATION: &str = include_str!("../../../migrations/001_schema.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent: every statement in the embedded SQL checks
/// for existing objects before creating them.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    sqlx::raw_sql(SCHEMA_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("Schema migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notes` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_migration_embedded() {
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS note_access"));
    }

    #[test]
    fn test_schema_has_fulltext_index() {
        assert!(SCHEMA_MIGRATION.contains("to_tsvector('english', title || ' ' || content)"));
    }

    #[test]
    fn test_access_rows_cascade_with_note() {
        assert!(SCHEMA_MIGRATION.contains("ON DELETE CASCADE"));
    }
}
