//! Repository error types.

use sched_api::ApiError;
use sched_config::ConfigError;
use sched_db::error::DatabaseError;
use thiserror::Error;

/// Errors surfaced by repository reads and mutations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The network adapter failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The persistence adapter failed.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// The favorite source reported a failure.
    #[error("Favorite source failed: {0}")]
    Favorites(String),

    /// Session rows could not be merged.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// A task on the worker pool panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// No runtime was available to run the worker pool on.
    #[error("Runtime unavailable: {0}")]
    Runtime(String),

    /// A feed ended before it produced its first value.
    #[error("The {0} feed closed before producing a value")]
    SourceClosed(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from merging a session-row snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The snapshot has no session to anchor day offsets on.
    #[error("no session with a start time to compute day offsets from")]
    NoStartTime,
}
