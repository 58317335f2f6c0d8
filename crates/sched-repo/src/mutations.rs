//! Writes. Each one runs on the worker pool and is awaited through its join
//! handle, so dropping the caller's future never aborts a write midway.

use std::sync::Arc;

use sched_api::RawResponse;
use sched_core::entities::SessionFeedback;

use crate::error::RepositoryError;
use crate::ports::{FavoriteStore, ScheduleApi, SessionStore};
use crate::repository::SessionRepository;

impl<S, F, A> SessionRepository<S, F, A>
where
    S: SessionStore,
    F: FavoriteStore,
    A: ScheduleApi,
{
    /// Flip the favorite mark on `session_id`, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the favorite store write fails.
    pub async fn favorite(&self, session_id: &str) -> Result<bool, RepositoryError> {
        let favorites = Arc::clone(&self.favorites);
        let session_id = session_id.to_owned();
        self.pool
            .run(async move {
                let favorited = favorites.toggle(&session_id).await?;
                tracing::debug!(%session_id, favorited, "toggled favorite");
                Ok(favorited)
            })
            .await
    }

    /// Fetch the schedule and replace every stored row with it.
    ///
    /// Nothing is written if the fetch fails. The replace is a single
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Api` for a failed fetch, or
    /// `RepositoryError::Database` if the replace fails.
    pub async fn refresh_sessions(&self) -> Result<(), RepositoryError> {
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        self.pool
            .run(async move {
                let schedule = api.fetch_schedule().await?;
                store.replace_all(&schedule).await?;
                tracing::info!(
                    sessions = schedule.sessions.len(),
                    speakers = schedule.speakers.len(),
                    "refreshed sessions"
                );
                Ok(())
            })
            .await
    }

    /// Store `feedback` locally, replacing earlier feedback for the session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    pub async fn save_session_feedback(
        &self,
        feedback: &SessionFeedback,
    ) -> Result<(), RepositoryError> {
        let store = Arc::clone(&self.store);
        let feedback = feedback.clone();
        self.pool
            .run(async move {
                store.append_feedback(&feedback).await?;
                tracing::debug!(session_id = %feedback.session_id, "saved feedback");
                Ok(())
            })
            .await
    }

    /// Send `feedback` to the remote endpoint. The response comes back as is;
    /// a non-2xx status is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Api` only if the request could not be made.
    pub async fn submit_session_feedback(
        &self,
        feedback: &SessionFeedback,
    ) -> Result<RawResponse, RepositoryError> {
        let api = Arc::clone(&self.api);
        let feedback = feedback.clone();
        self.pool
            .run(async move {
                let response = api.submit_feedback(&feedback).await?;
                tracing::debug!(
                    session_id = %feedback.session_id,
                    status = response.status,
                    "submitted feedback"
                );
                Ok(response)
            })
            .await
    }
}
