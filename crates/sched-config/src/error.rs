//! Errors raised while loading or reading confsched configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `SCHED_*` variable could not be parsed into
    /// [`crate::SchedConfig`].
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The `[api]` section has no `base_url`, so no request URL can be built.
    #[error("[{section}] has no base_url (set {section}.base_url or SCHED_API__BASE_URL)")]
    NotConfigured { section: String },

    /// A value parsed but is outside what the crate can use, such as a UTC
    /// offset of a day or more or an empty worker pool.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
