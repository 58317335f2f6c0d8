//! # sched-api
//!
//! HTTP client for the conference API.
//!
//! Two calls are exposed:
//! - [`ScheduleClient::fetch_schedule`] downloads the whole schedule
//!   (sessions, speakers, rooms, topics) as a [`ScheduleResponse`].
//! - [`ScheduleClient::submit_feedback`] posts a session feedback record and
//!   hands back the raw response status without interpreting it.

mod error;
mod feedback;
mod http;
mod schedule;

pub use error::ApiError;
pub use feedback::FeedbackPayload;
pub use sched_core::rows::ScheduleResponse;

use sched_config::ApiConfig;
use serde::{Deserialize, Serialize};

/// Transport-level outcome of a request whose body is not interpreted.
///
/// The body is always discarded; only the status is kept so that callers can
/// decide for themselves what counts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub status: u16,
}

/// HTTP client for the schedule and feedback endpoints.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    schedule_url: String,
    feedback_url: String,
}

impl ScheduleClient {
    /// Create a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if `api.base_url` is not set, or
    /// `ApiError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            schedule_url: config.schedule_url()?,
            feedback_url: config.feedback_url()?,
        })
    }

    #[must_use]
    pub fn schedule_url(&self) -> &str {
        &self.schedule_url
    }

    #[must_use]
    pub fn feedback_url(&self) -> &str {
        &self.feedback_url
    }
}
