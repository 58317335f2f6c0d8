//! General application configuration.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Conference local time, UTC+09:00.
const fn default_utc_offset_minutes() -> i32 {
    9 * 60
}

const fn default_worker_threads() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Offset of the conference's local time from UTC, in minutes. Day
    /// boundaries for day offsets are taken in this time zone.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Size of the dedicated worker pool running merges and writes.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            worker_threads: default_worker_threads(),
        }
    }
}

impl GeneralConfig {
    /// The conference time zone as a chrono offset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the offset is a day or more,
    /// including values whose conversion to seconds overflows.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "general.utc_offset_minutes".to_string(),
                reason: format!("{} is out of range", self.utc_offset_minutes),
            })
    }

    /// Validated worker pool size.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a pool of zero threads.
    pub fn worker_threads(&self) -> Result<usize, ConfigError> {
        if self.worker_threads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.worker_threads".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self.worker_threads)
    }
}
