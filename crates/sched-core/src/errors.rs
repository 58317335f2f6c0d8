//! Cross-cutting error types for confsched.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ApiError`) are defined in
//! their respective crates and converge in `sched-repo`'s `RepositoryError`.

use thiserror::Error;

/// Errors that can be raised by any confsched crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
