//! # sched-db
//!
//! libSQL persistence for the conference schedule.
//!
//! Owns every persisted table: rooms, topics, speakers, sessions, the
//! session/speaker link table, session feedback, and the favorite set. Each
//! table group is also published as a snapshot on a `tokio::sync::watch`
//! channel, so readers get a multicast push stream that replays the current
//! snapshot on subscribe and advances after every committed write.

pub mod error;
mod feeds;
pub mod helpers;
mod migrations;
pub mod repos;

pub use feeds::FavoriteSnapshot;

use std::collections::HashSet;
use std::sync::Arc;

use error::DatabaseError;
use feeds::{Feeds, ScheduleSnapshot};
use libsql::Builder;
use sched_core::entities::{Room, SessionFeedback, Topic};
use sched_core::rows::{SessionRow, SpeakerRow};
use tokio::sync::{Mutex, watch};

/// Central database handle for schedule, feedback, and favorite state.
///
/// All statements run on a single connection behind an async mutex, so a
/// write transaction never interleaves with another write or with the
/// snapshot queries that follow a commit.
pub struct ScheduleDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    lock: Mutex<()>,
    feeds: Feeds,
}

impl ScheduleDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically and publishes the initial snapshots.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened, migrations
    /// fail, or the initial snapshots cannot be read.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sched_db = Self {
            db,
            conn,
            lock: Mutex::new(()),
            feeds: Feeds::new(),
        };
        sched_db.run_migrations().await?;
        sched_db.publish_schedule().await?;
        sched_db.publish_feedback().await?;
        sched_db.publish_favorites().await;
        Ok(sched_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Subscribe to session rows. Empty until the first schedule is stored.
    #[must_use]
    pub fn subscribe_sessions(&self) -> watch::Receiver<Arc<Vec<SessionRow>>> {
        self.feeds.sessions.subscribe()
    }

    #[must_use]
    pub fn subscribe_speakers(&self) -> watch::Receiver<Arc<Vec<SpeakerRow>>> {
        self.feeds.speakers.subscribe()
    }

    #[must_use]
    pub fn subscribe_rooms(&self) -> watch::Receiver<Arc<Vec<Room>>> {
        self.feeds.rooms.subscribe()
    }

    #[must_use]
    pub fn subscribe_topics(&self) -> watch::Receiver<Arc<Vec<Topic>>> {
        self.feeds.topics.subscribe()
    }

    #[must_use]
    pub fn subscribe_feedback(&self) -> watch::Receiver<Arc<Vec<SessionFeedback>>> {
        self.feeds.feedback.subscribe()
    }

    /// Subscribe to the favorite set. A failed re-read is published as an
    /// `Err` snapshot rather than closing the channel.
    #[must_use]
    pub fn subscribe_favorites(&self) -> watch::Receiver<FavoriteSnapshot> {
        self.feeds.favorites.subscribe()
    }

    /// Re-read the schedule tables and publish them. Caller holds `lock` or
    /// is still constructing `self`.
    async fn publish_schedule(&self) -> Result<(), DatabaseError> {
        let snapshot = self.load_schedule().await?;
        self.feeds.send_schedule(snapshot);
        Ok(())
    }

    /// Read every schedule table. Inside an open transaction this sees the
    /// uncommitted rows, since all statements share one connection.
    async fn load_schedule(&self) -> Result<ScheduleSnapshot, DatabaseError> {
        let snapshot = ScheduleSnapshot {
            sessions: self.load_session_rows().await?,
            speakers: self.load_speaker_rows().await?,
            rooms: self.load_rooms().await?,
            topics: self.load_topics().await?,
        };
        tracing::debug!(
            sessions = snapshot.sessions.len(),
            speakers = snapshot.speakers.len(),
            "read schedule snapshot"
        );
        Ok(snapshot)
    }

    async fn publish_feedback(&self) -> Result<(), DatabaseError> {
        let feedback = self.load_feedback().await?;
        self.feeds.feedback.send_replace(Arc::new(feedback));
        Ok(())
    }

    async fn publish_favorites(&self) {
        let snapshot: FavoriteSnapshot = match self.load_favorites().await {
            Ok(ids) => Ok(Arc::new(ids.into_iter().collect::<HashSet<_>>())),
            Err(e) => {
                tracing::warn!(%e, "failed to read favorites");
                Err(Arc::new(e))
            }
        };
        self.feeds.favorites.send_replace(snapshot);
    }
}
