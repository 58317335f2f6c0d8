//! Port implementations for the libSQL store and the HTTP client.

use std::sync::Arc;

use futures::StreamExt;
use sched_api::{RawResponse, ScheduleClient};
use sched_core::entities::{Room, SessionFeedback, Topic};
use sched_core::rows::{ScheduleResponse, SessionRow, SpeakerRow};
use sched_db::ScheduleDb;
use tokio_stream::wrappers::WatchStream;

use crate::error::RepositoryError;
use crate::ports::{FavoriteIds, FavoriteStore, ScheduleApi, SessionStore, SourceStream};

impl SessionStore for ScheduleDb {
    fn session_rows(&self) -> SourceStream<Arc<Vec<SessionRow>>> {
        WatchStream::new(self.subscribe_sessions()).boxed()
    }

    fn speaker_rows(&self) -> SourceStream<Arc<Vec<SpeakerRow>>> {
        WatchStream::new(self.subscribe_speakers()).boxed()
    }

    fn room_rows(&self) -> SourceStream<Arc<Vec<Room>>> {
        WatchStream::new(self.subscribe_rooms()).boxed()
    }

    fn topic_rows(&self) -> SourceStream<Arc<Vec<Topic>>> {
        WatchStream::new(self.subscribe_topics()).boxed()
    }

    fn feedback_rows(&self) -> SourceStream<Arc<Vec<SessionFeedback>>> {
        WatchStream::new(self.subscribe_feedback()).boxed()
    }

    async fn replace_all(&self, schedule: &ScheduleResponse) -> Result<(), RepositoryError> {
        Ok(Self::replace_all(self, schedule).await?)
    }

    async fn append_feedback(&self, feedback: &SessionFeedback) -> Result<(), RepositoryError> {
        Ok(Self::append_feedback(self, feedback).await?)
    }
}

impl FavoriteStore for ScheduleDb {
    fn favorites(&self) -> SourceStream<Result<FavoriteIds, RepositoryError>> {
        WatchStream::new(self.subscribe_favorites())
            .map(|snapshot| snapshot.map_err(|e| RepositoryError::Favorites(e.to_string())))
            .boxed()
    }

    async fn toggle(&self, session_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.toggle_favorite(session_id).await?)
    }
}

impl ScheduleApi for ScheduleClient {
    async fn fetch_schedule(&self) -> Result<ScheduleResponse, RepositoryError> {
        Ok(Self::fetch_schedule(self).await?)
    }

    async fn submit_feedback(&self, feedback: &SessionFeedback) -> Result<RawResponse, RepositoryError> {
        Ok(Self::submit_feedback(self, feedback).await?)
    }
}
