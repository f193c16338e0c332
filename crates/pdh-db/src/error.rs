//! Database error types for pdh-db.

use pdh_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An owner-scoped lookup matched no row. `entity` is the label shown to
    /// API clients (e.g. `"Project"`, `"CSD item"`).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// The row exists but hangs off another project. Reported as not found.
    #[error("{0}")]
    OutsideProject(&'static str),

    /// A schema constraint (CHECK, UNIQUE, FOREIGN KEY, NOT NULL) rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Request data rejected before reaching SQL.
    #[error("{0}")]
    Validation(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<libsql::Error> for DatabaseError {
    /// Constraint failures are split out so callers can answer 400 instead of 500.
    fn from(error: libsql::Error) -> Self {
        let message = error.to_string();
        if message.contains("constraint failed") {
            Self::Constraint(message)
        } else {
            Self::LibSql(error)
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => {
                Self::Query(format!("{entity_type} {id} not found"))
            }
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
