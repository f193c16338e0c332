//! Cross-cutting error types for Product Discovery Hub.
//!
//! Errors that any crate may raise. Domain-specific errors (`DatabaseError`,
//! `AiError`, ...) live in their own crates and converge in `pdh-server`,
//! where each one maps to an HTTP status.

use thiserror::Error;

/// Errors that can be raised by any Product Discovery Hub crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result. `entity_type` is the human label
    /// used in the response detail (e.g. `"CSD item"`).
    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: String },

    /// Request data failed validation (length, range, enum membership).
    #[error("{0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`].
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
