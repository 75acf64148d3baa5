//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: users and wellness sessions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (credential store)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD last_login ON TABLE user TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
DEFINE INDEX idx_user_created_at ON TABLE user COLUMNS created_at;

-- =======================================================================
-- Wellness sessions (owned by a user)
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD owner_id ON TABLE session TYPE string;
DEFINE FIELD title ON TABLE session TYPE string;
DEFINE FIELD tags ON TABLE session TYPE array<string> DEFAULT [];
DEFINE FIELD json_file_url ON TABLE session TYPE string DEFAULT '';
DEFINE FIELD status ON TABLE session TYPE string \
    ASSERT $value IN ['draft', 'published'];
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD published_at ON TABLE session TYPE option<datetime>;
DEFINE INDEX idx_session_owner ON TABLE session COLUMNS owner_id;
DEFINE INDEX idx_session_status ON TABLE session COLUMNS status;
DEFINE INDEX idx_session_created_at ON TABLE session COLUMNS created_at;
DEFINE INDEX idx_session_updated_at ON TABLE session COLUMNS updated_at;
DEFINE INDEX idx_session_tags ON TABLE session COLUMNS tags;
";

/// Apply all pending migrations in version order.
///
/// Safe to call on every startup: already-applied versions are skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

/// Delete every user and session record. Schema and migration history
/// are left in place.
pub async fn purge<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query("DELETE session; DELETE user;")
        .await?
        .check()
        .map_err(DbError::Surreal)?;
    info!("Purged all users and sessions");
    Ok(())
}
