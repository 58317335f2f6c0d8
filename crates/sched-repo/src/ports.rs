//! Source adapter seams.
//!
//! The aggregation core only talks to its collaborators through these three
//! traits. Read methods return multicast push streams that replay the current
//! snapshot on subscribe; write methods are plain futures. `sched-db` and
//! `sched-api` provide the production implementations (see `adapters`).

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures::stream::BoxStream;
use sched_api::RawResponse;
use sched_core::entities::{Room, SessionFeedback, Topic};
use sched_core::rows::{ScheduleResponse, SessionRow, SpeakerRow};

use crate::error::RepositoryError;

/// A push stream handed out by a source adapter.
pub type SourceStream<T> = BoxStream<'static, T>;

/// The favorite set as a source emits it.
pub type FavoriteIds = Arc<HashSet<String>>;

/// Persisted schedule rows and feedback.
pub trait SessionStore: Send + Sync + 'static {
    fn session_rows(&self) -> SourceStream<Arc<Vec<SessionRow>>>;

    fn speaker_rows(&self) -> SourceStream<Arc<Vec<SpeakerRow>>>;

    fn room_rows(&self) -> SourceStream<Arc<Vec<Room>>>;

    fn topic_rows(&self) -> SourceStream<Arc<Vec<Topic>>>;

    fn feedback_rows(&self) -> SourceStream<Arc<Vec<SessionFeedback>>>;

    /// Atomically replace every schedule row with `schedule`.
    fn replace_all(
        &self,
        schedule: &ScheduleResponse,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn append_feedback(
        &self,
        feedback: &SessionFeedback,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// The user's favorite session ids.
pub trait FavoriteStore: Send + Sync + 'static {
    /// Current favorite set. Items may be errors; the stream keeps going.
    fn favorites(&self) -> SourceStream<Result<FavoriteIds, RepositoryError>>;

    /// Flip membership of `session_id`, returning the new state.
    fn toggle(&self, session_id: &str) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// The remote conference API.
pub trait ScheduleApi: Send + Sync + 'static {
    fn fetch_schedule(&self) -> impl Future<Output = Result<ScheduleResponse, RepositoryError>> + Send;

    /// Send feedback; the transport response is returned unclassified.
    fn submit_feedback(
        &self,
        feedback: &SessionFeedback,
    ) -> impl Future<Output = Result<RawResponse, RepositoryError>> + Send;
}
