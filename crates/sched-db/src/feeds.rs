//! Snapshot channels backing the read streams.

use std::collections::HashSet;
use std::sync::Arc;

use sched_core::entities::{Room, SessionFeedback, Topic};
use sched_core::rows::{SessionRow, SpeakerRow};
use tokio::sync::watch;

use crate::error::DatabaseError;

/// Current favorite session ids, or the error that prevented reading them.
pub type FavoriteSnapshot = Result<Arc<HashSet<String>>, Arc<DatabaseError>>;

/// One consistent read of the schedule tables.
pub(crate) struct ScheduleSnapshot {
    pub(crate) sessions: Vec<SessionRow>,
    pub(crate) speakers: Vec<SpeakerRow>,
    pub(crate) rooms: Vec<Room>,
    pub(crate) topics: Vec<Topic>,
}

pub(crate) struct Feeds {
    pub(crate) sessions: watch::Sender<Arc<Vec<SessionRow>>>,
    pub(crate) speakers: watch::Sender<Arc<Vec<SpeakerRow>>>,
    pub(crate) rooms: watch::Sender<Arc<Vec<Room>>>,
    pub(crate) topics: watch::Sender<Arc<Vec<Topic>>>,
    pub(crate) feedback: watch::Sender<Arc<Vec<SessionFeedback>>>,
    pub(crate) favorites: watch::Sender<FavoriteSnapshot>,
}

impl Feeds {
    pub(crate) fn new() -> Self {
        Self {
            sessions: watch::Sender::new(Arc::default()),
            speakers: watch::Sender::new(Arc::default()),
            rooms: watch::Sender::new(Arc::default()),
            topics: watch::Sender::new(Arc::default()),
            feedback: watch::Sender::new(Arc::default()),
            favorites: watch::Sender::new(Ok(Arc::default())),
        }
    }

    pub(crate) fn send_schedule(&self, snapshot: ScheduleSnapshot) {
        self.sessions.send_replace(Arc::new(snapshot.sessions));
        self.speakers.send_replace(Arc::new(snapshot.speakers));
        self.rooms.send_replace(Arc::new(snapshot.rooms));
        self.topics.send_replace(Arc::new(snapshot.topics));
    }
}
