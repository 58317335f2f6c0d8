//! Schedule download.

use sched_core::rows::ScheduleResponse;

use crate::{ScheduleClient, error::ApiError, http::check_response};

impl ScheduleClient {
    /// Download the full conference schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the API returns a
    /// non-success status, or the body is not a valid schedule document.
    pub async fn fetch_schedule(&self) -> Result<ScheduleResponse, ApiError> {
        let resp = check_response(self.http.get(&self.schedule_url).send().await?).await?;
        let body = resp.text().await?;
        let schedule: ScheduleResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        tracing::debug!(
            sessions = schedule.sessions.len(),
            speakers = schedule.speakers.len(),
            "fetched schedule"
        );
        Ok(schedule)
    }
}
