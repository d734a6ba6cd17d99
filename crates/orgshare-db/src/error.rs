//! Database-specific error types and conversions.

use orgshare_core::error::OrgshareError;

/// Database-layer error type.
///
/// Covers infrastructure failures only. Domain outcomes (a missing
/// application or organization) are constructed directly as the typed
/// core variants by the repositories, because callers match on them.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record codec error: {0}")]
    Codec(String),
}

impl From<DbError> for OrgshareError {
    fn from(err: DbError) -> Self {
        OrgshareError::Database(err.to_string())
    }
}
