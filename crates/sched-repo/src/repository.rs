//! The session repository: every derived feed, wired once.

use std::future;
use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;
use sched_api::ScheduleClient;
use sched_config::SchedConfig;
use sched_core::entities::{Room, SearchResult, Session, SessionFeedback, Speaker, Topic};
use sched_db::ScheduleDb;

use crate::error::RepositoryError;
use crate::feed::Feed;
use crate::feedback::correlated;
use crate::merger::SessionMerger;
use crate::ports::{FavoriteStore, ScheduleApi, SessionStore};
use crate::search;
use crate::views::{self, LevelSessions, RoomSessions, SpeakerSessions, TopicSessions};
use crate::worker::WorkerPool;

/// Aggregates the store, favorite, and API ports into shared feeds.
///
/// Every feed is computed once on the worker pool and shared by all of its
/// subscribers. Feeds keep running until the repository and all of their
/// subscribers are dropped.
pub struct SessionRepository<S, F, A> {
    pub(crate) store: Arc<S>,
    pub(crate) favorites: Arc<F>,
    pub(crate) api: Arc<A>,
    pub(crate) pool: WorkerPool,
    sessions: Feed<Vec<Session>>,
    speakers: Feed<Vec<Speaker>>,
    rooms: Feed<Vec<Room>>,
    topics: Feed<Vec<Topic>>,
    feedback: Feed<Vec<SessionFeedback>>,
    room_sessions: Feed<RoomSessions>,
    topic_sessions: Feed<TopicSessions>,
    speaker_sessions: Feed<SpeakerSessions>,
    level_sessions: Feed<LevelSessions>,
}

/// The production wiring: libSQL for rows and favorites, HTTP for the API.
pub type LocalRepository = SessionRepository<ScheduleDb, ScheduleDb, ScheduleClient>;

impl<S, F, A> SessionRepository<S, F, A>
where
    S: SessionStore,
    F: FavoriteStore,
    A: ScheduleApi,
{
    pub fn new(
        store: Arc<S>,
        favorites: Arc<F>,
        api: Arc<A>,
        pool: WorkerPool,
        merger: SessionMerger,
    ) -> Self {
        let sessions = Feed::spawn(
            &pool,
            "sessions",
            merger.merged(
                store.session_rows(),
                store.speaker_rows(),
                favorites.favorites(),
            ),
        );

        let speakers = Feed::spawn(
            &pool,
            "speakers",
            store
                .speaker_rows()
                .filter(|rows| future::ready(!rows.is_empty()))
                .map(|rows| rows.iter().map(Speaker::from).collect::<Vec<_>>()),
        );

        let rooms = Feed::spawn(
            &pool,
            "rooms",
            store
                .room_rows()
                .filter(|rooms| future::ready(!rooms.is_empty()))
                .map(|rooms| rooms.to_vec()),
        );

        let topics = Feed::spawn(
            &pool,
            "topics",
            store.topic_rows().map(|topics| topics.to_vec()),
        );

        let feedback = Feed::spawn(
            &pool,
            "feedback",
            correlated(store.session_rows(), store.feedback_rows()),
        );

        let room_sessions = sessions.map(&pool, "room_sessions", |s: &Vec<Session>| views::by_room(s));
        let topic_sessions = sessions.map(&pool, "topic_sessions", |s: &Vec<Session>| views::by_topic(s));
        let speaker_sessions =
            sessions.map(&pool, "speaker_sessions", |s: &Vec<Session>| views::by_speaker(s));
        let level_sessions = sessions.map(&pool, "level_sessions", |s: &Vec<Session>| views::by_level(s));

        Self {
            store,
            favorites,
            api,
            pool,
            sessions,
            speakers,
            rooms,
            topics,
            feedback,
            room_sessions,
            topic_sessions,
            speaker_sessions,
            level_sessions,
        }
    }

    /// Merged speech sessions followed by the special sessions.
    #[must_use]
    pub const fn sessions(&self) -> &Feed<Vec<Session>> {
        &self.sessions
    }

    #[must_use]
    pub const fn speakers(&self) -> &Feed<Vec<Speaker>> {
        &self.speakers
    }

    #[must_use]
    pub const fn rooms(&self) -> &Feed<Vec<Room>> {
        &self.rooms
    }

    #[must_use]
    pub const fn topics(&self) -> &Feed<Vec<Topic>> {
        &self.topics
    }

    /// Stored feedback with session titles filled in.
    #[must_use]
    pub const fn session_feedbacks(&self) -> &Feed<Vec<SessionFeedback>> {
        &self.feedback
    }

    #[must_use]
    pub const fn room_sessions(&self) -> &Feed<RoomSessions> {
        &self.room_sessions
    }

    #[must_use]
    pub const fn topic_sessions(&self) -> &Feed<TopicSessions> {
        &self.topic_sessions
    }

    #[must_use]
    pub const fn speaker_sessions(&self) -> &Feed<SpeakerSessions> {
        &self.speaker_sessions
    }

    #[must_use]
    pub const fn level_sessions(&self) -> &Feed<LevelSessions> {
        &self.level_sessions
    }

    #[must_use]
    pub const fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Search the current sessions and speakers, waiting for the first merge
    /// if none has happened yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::SourceClosed` if the sessions or speakers
    /// feed ends without a value.
    pub async fn search(&self, query: &str) -> Result<SearchResult, RepositoryError> {
        let sessions = self.sessions.clone();
        let speakers = self.speakers.clone();
        let query = query.to_owned();
        self.pool
            .run(async move {
                let (sessions, speakers) = tokio::try_join!(sessions.first(), speakers.first())?;
                let result = search::search(&query, &sessions, &speakers);
                tracing::debug!(
                    query = %query,
                    sessions = result.sessions.len(),
                    speakers = result.speakers.len(),
                    "search"
                );
                Ok(result)
            })
            .await
    }
}

impl LocalRepository {
    /// Open the libSQL store and HTTP client described by `config` on a
    /// dedicated worker pool.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the configuration is invalid, the
    /// database cannot be opened, or the worker pool cannot start.
    pub async fn open(config: &SchedConfig) -> Result<Self, RepositoryError> {
        let merger = SessionMerger::new(config.general.utc_offset()?);
        let api = Arc::new(ScheduleClient::from_config(&config.api)?);

        if !config.store.is_in_memory() {
            if let Some(parent) = Path::new(&config.store.db_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let db = Arc::new(ScheduleDb::open_local(&config.store.db_path).await?);
        let pool = WorkerPool::from_config(&config.general)?;

        tracing::info!(db_path = %config.store.db_path, api = api.schedule_url(), "opened session repository");
        Ok(Self::new(Arc::clone(&db), db, api, pool, merger))
    }
}
