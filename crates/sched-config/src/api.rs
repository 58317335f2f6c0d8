//! Remote schedule and feedback endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_schedule_path() -> String {
    "/schedule.json".to_string()
}

fn default_feedback_path() -> String {
    "/feedback".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "confsched/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the conference API (e.g., `https://api.example.org/2018`).
    #[serde(default)]
    pub base_url: String,

    /// Path of the schedule document, appended to `base_url`.
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,

    /// Path feedback is posted to, appended to `base_url`.
    #[serde(default = "default_feedback_path")]
    pub feedback_path: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            schedule_path: default_schedule_path(),
            feedback_path: default_feedback_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check if the API config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Full schedule URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if `base_url` is empty.
    pub fn schedule_url(&self) -> Result<String, ConfigError> {
        self.join(&self.schedule_path)
    }

    /// Full feedback URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if `base_url` is empty.
    pub fn feedback_url(&self) -> Result<String, ConfigError> {
        self.join(&self.feedback_path)
    }

    fn join(&self, path: &str) -> Result<String, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".to_string(),
            });
        }
        Ok(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}
