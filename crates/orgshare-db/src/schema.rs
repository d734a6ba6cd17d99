//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings; the free-form application definition
//! document is stored as a FLEXIBLE object.

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
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (hierarchy nodes, one tenant domain each)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD tenant_domain ON TABLE organization TYPE string;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_tenant_domain ON TABLE organization \
    COLUMNS tenant_domain UNIQUE;

-- =======================================================================
-- Applications (tenant scope)
-- =======================================================================
-- The record id is the application resource id. Identity fields are
-- flat columns; the definition document (description, properties,
-- auth configuration, claims) is one flexible object.
DEFINE TABLE application SCHEMAFULL;
DEFINE FIELD tenant_domain ON TABLE application TYPE string;
DEFINE FIELD name ON TABLE application TYPE string;
DEFINE FIELD definition ON TABLE application TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_application_tenant_name ON TABLE application \
    COLUMNS tenant_domain, name UNIQUE;

-- =======================================================================
-- Main <-> fragment sharing links
-- =======================================================================
-- Owned by the provisioning subsystem; the consistency rules only read
-- them. At most one main per fragment, any number of fragments per main.
DEFINE TABLE shared_application SCHEMAFULL;
DEFINE FIELD main_application_id ON TABLE shared_application TYPE string;
DEFINE FIELD main_organization_id ON TABLE shared_application \
    TYPE string;
DEFINE FIELD fragment_application_id ON TABLE shared_application \
    TYPE string;
DEFINE FIELD fragment_organization_id ON TABLE shared_application \
    TYPE string;
DEFINE FIELD created_at ON TABLE shared_application TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_shared_application_fragment ON TABLE shared_application \
    COLUMNS fragment_application_id, fragment_organization_id UNIQUE;
DEFINE INDEX idx_shared_application_main ON TABLE shared_application \
    COLUMNS main_application_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
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

            // Record the applied migration.
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
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
