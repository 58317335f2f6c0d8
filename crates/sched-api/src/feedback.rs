//! Feedback submission.

use sched_core::entities::SessionFeedback;
use serde::Serialize;

use crate::{RawResponse, ScheduleClient, error::ApiError};

/// The fields of a [`SessionFeedback`] that are sent to the feedback endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackPayload<'a> {
    pub session_id: &'a str,
    pub session_title: &'a str,
    pub overall: i32,
    pub relevancy: i32,
    pub as_expected: i32,
    pub difficulty: i32,
    pub knowledgeable: i32,
    pub comment: &'a str,
}

impl<'a> From<&'a SessionFeedback> for FeedbackPayload<'a> {
    fn from(fb: &'a SessionFeedback) -> Self {
        Self {
            session_id: &fb.session_id,
            session_title: &fb.session_title,
            overall: fb.overall,
            relevancy: fb.relevancy,
            as_expected: fb.as_expected,
            difficulty: fb.difficulty,
            knowledgeable: fb.knowledgeable,
            comment: &fb.comment,
        }
    }
}

impl ScheduleClient {
    /// Post a feedback record.
    ///
    /// Any HTTP status, including 4xx and 5xx, is returned as `Ok`; the body
    /// is discarded.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` only when no response was received at all
    /// (connection refused, timeout, ...).
    pub async fn submit_feedback(&self, feedback: &SessionFeedback) -> Result<RawResponse, ApiError> {
        let resp = self
            .http
            .post(&self.feedback_url)
            .json(&FeedbackPayload::from(feedback))
            .send()
            .await?;
        let status = resp.status().as_u16();
        tracing::debug!(session_id = %feedback.session_id, status, "submitted feedback");
        Ok(RawResponse { status })
    }
}
