//! Status handling for responses whose body this crate decodes.
//!
//! Feedback submission does not go through here; its status is handed back
//! to the caller as is.

use crate::error::ApiError;

/// Pass a success response through, or turn any other status into
/// [`ApiError::Api`] carrying the status and the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}
