//! Shared fixtures and in-memory port fakes for the repository tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use futures::{FutureExt, StreamExt};
use sched_api::{ApiError, RawResponse};
use sched_core::entities::{Room, SessionFeedback, Topic};
use sched_core::enums::Level;
use sched_core::rows::{ScheduleResponse, ScheduledSession, SessionRow, SpeakerRow};
use sched_db::error::DatabaseError;
use sched_repo::ports::{FavoriteIds, FavoriteStore, ScheduleApi, SessionStore, SourceStream};
use sched_repo::{RepositoryError, SessionMerger, SessionRepository, WorkerPool};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

pub type TestRepository = SessionRepository<FakeStore, FakeFavorites, FakeApi>;

/// Install a test subscriber filtered by `SCHED_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SCHED_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// `hour` o'clock UTC on 2018-02-`day`.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 2, day, hour, 0, 0).unwrap()
}

pub fn room(id: i32) -> Room {
    Room {
        id,
        name: format!("Room {id}"),
    }
}

pub fn topic(id: i32) -> Topic {
    Topic {
        id,
        name: format!("Topic {id}"),
    }
}

pub fn row(id: &str, start: DateTime<Utc>, room_id: i32, speakers: &[&str]) -> SessionRow {
    SessionRow {
        id: id.into(),
        title: format!("Talk {id}"),
        description: format!("All about {id}"),
        start_time: start,
        end_time: start + chrono::Duration::minutes(30),
        room: room(room_id),
        topic: topic(1),
        level: Level::Beginner,
        speaker_ids: speakers.iter().map(ToString::to_string).collect(),
    }
}

pub fn speaker_row(id: &str, name: &str) -> SpeakerRow {
    SpeakerRow {
        id: id.into(),
        name: name.into(),
        tagline: format!("{name} builds apps"),
        image_url: None,
        twitter: None,
        github: None,
        blog_url: None,
    }
}

pub fn schedule() -> ScheduleResponse {
    let session = |id: &str, hour: u32, room_id: i32, speakers: &[&str]| ScheduledSession {
        id: id.into(),
        title: format!("Talk {id}"),
        description: format!("All about {id}"),
        start_time: at(8, hour),
        end_time: at(8, hour) + chrono::Duration::minutes(30),
        room_id,
        topic_id: 1,
        level: Level::Beginner,
        speaker_ids: speakers.iter().map(ToString::to_string).collect(),
    };
    ScheduleResponse {
        sessions: vec![
            session("s2", 2, 1, &["sp2"]),
            session("s1", 1, 2, &["sp1", "sp2"]),
        ],
        speakers: vec![speaker_row("sp1", "Alice"), speaker_row("sp2", "Bob")],
        rooms: vec![room(1), room(2)],
        topics: vec![topic(1)],
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Session store backed by watch channels the test can push into.
pub struct FakeStore {
    pub sessions: watch::Sender<Arc<Vec<SessionRow>>>,
    pub speakers: watch::Sender<Arc<Vec<SpeakerRow>>>,
    pub rooms: watch::Sender<Arc<Vec<Room>>>,
    pub topics: watch::Sender<Arc<Vec<Topic>>>,
    pub feedback: watch::Sender<Arc<Vec<SessionFeedback>>>,
    pub fail_writes: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            sessions: watch::Sender::new(Arc::default()),
            speakers: watch::Sender::new(Arc::default()),
            rooms: watch::Sender::new(Arc::default()),
            topics: watch::Sender::new(Arc::default()),
            feedback: watch::Sender::new(Arc::default()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_sessions(&self, rows: Vec<SessionRow>) {
        self.sessions.send_replace(Arc::new(rows));
    }

    pub fn set_speakers(&self, rows: Vec<SpeakerRow>) {
        self.speakers.send_replace(Arc::new(rows));
    }

    pub fn set_feedback(&self, rows: Vec<SessionFeedback>) {
        self.feedback.send_replace(Arc::new(rows));
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::Query("injected write failure".into()).into());
        }
        Ok(())
    }
}

impl SessionStore for FakeStore {
    fn session_rows(&self) -> SourceStream<Arc<Vec<SessionRow>>> {
        WatchStream::new(self.sessions.subscribe()).boxed()
    }

    fn speaker_rows(&self) -> SourceStream<Arc<Vec<SpeakerRow>>> {
        WatchStream::new(self.speakers.subscribe()).boxed()
    }

    fn room_rows(&self) -> SourceStream<Arc<Vec<Room>>> {
        WatchStream::new(self.rooms.subscribe()).boxed()
    }

    fn topic_rows(&self) -> SourceStream<Arc<Vec<Topic>>> {
        WatchStream::new(self.topics.subscribe()).boxed()
    }

    fn feedback_rows(&self) -> SourceStream<Arc<Vec<SessionFeedback>>> {
        WatchStream::new(self.feedback.subscribe()).boxed()
    }

    async fn replace_all(&self, schedule: &ScheduleResponse) -> Result<(), RepositoryError> {
        self.check_writable()?;
        let find_room = |id: i32| schedule.rooms.iter().find(|r| r.id == id).cloned();
        let find_topic = |id: i32| schedule.topics.iter().find(|t| t.id == id).cloned();
        let rows = schedule
            .sessions
            .iter()
            .map(|s| SessionRow {
                id: s.id.clone(),
                title: s.title.clone(),
                description: s.description.clone(),
                start_time: s.start_time,
                end_time: s.end_time,
                room: find_room(s.room_id).unwrap_or_else(|| room(s.room_id)),
                topic: find_topic(s.topic_id).unwrap_or_else(|| topic(s.topic_id)),
                level: s.level,
                speaker_ids: s.speaker_ids.clone(),
            })
            .collect();
        self.set_sessions(rows);
        self.set_speakers(schedule.speakers.clone());
        self.rooms.send_replace(Arc::new(schedule.rooms.clone()));
        self.topics.send_replace(Arc::new(schedule.topics.clone()));
        Ok(())
    }

    async fn append_feedback(&self, feedback: &SessionFeedback) -> Result<(), RepositoryError> {
        self.check_writable()?;
        self.feedback.send_modify(|rows| {
            let mut next = rows.to_vec();
            match next.iter_mut().find(|f| f.session_id == feedback.session_id) {
                Some(existing) => *existing = feedback.clone(),
                None => next.push(feedback.clone()),
            }
            *rows = Arc::new(next);
        });
        Ok(())
    }
}

/// Favorite store whose stream can be made to fail.
pub struct FakeFavorites {
    ids: Mutex<HashSet<String>>,
    tx: watch::Sender<Result<FavoriteIds, String>>,
}

impl FakeFavorites {
    pub fn new() -> Self {
        Self {
            ids: Mutex::new(HashSet::new()),
            tx: watch::Sender::new(Ok(FavoriteIds::default())),
        }
    }

    /// Publish a source error.
    pub fn fail(&self, message: &str) {
        self.tx.send_replace(Err(message.to_string()));
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.ids.lock().unwrap().contains(session_id)
    }
}

impl FavoriteStore for FakeFavorites {
    fn favorites(&self) -> SourceStream<Result<FavoriteIds, RepositoryError>> {
        WatchStream::new(self.tx.subscribe())
            .map(|snapshot| snapshot.map_err(RepositoryError::Favorites))
            .boxed()
    }

    async fn toggle(&self, session_id: &str) -> Result<bool, RepositoryError> {
        let (favorited, snapshot) = {
            let mut ids = self.ids.lock().unwrap();
            let favorited = if ids.remove(session_id) {
                false
            } else {
                ids.insert(session_id.to_string())
            };
            (favorited, ids.clone())
        };
        self.tx.send_replace(Ok(Arc::new(snapshot)));
        Ok(favorited)
    }
}

/// Conference API that serves a canned schedule, or fails when there is none.
pub struct FakeApi {
    pub schedule: Mutex<Option<ScheduleResponse>>,
    pub submitted: Mutex<Vec<SessionFeedback>>,
    pub submit_status: u16,
}

impl FakeApi {
    pub fn serving(schedule: Option<ScheduleResponse>) -> Self {
        Self {
            schedule: Mutex::new(schedule),
            submitted: Mutex::new(Vec::new()),
            submit_status: 200,
        }
    }
}

impl ScheduleApi for FakeApi {
    async fn fetch_schedule(&self) -> Result<ScheduleResponse, RepositoryError> {
        let schedule = self.schedule.lock().unwrap().clone();
        schedule.ok_or_else(|| {
            ApiError::Api {
                status: 503,
                message: "maintenance".into(),
            }
            .into()
        })
    }

    async fn submit_feedback(&self, feedback: &SessionFeedback) -> Result<RawResponse, RepositoryError> {
        self.submitted.lock().unwrap().push(feedback.clone());
        Ok(RawResponse {
            status: self.submit_status,
        })
    }
}

/// Everything a repository test needs to drive and observe.
pub struct Harness {
    pub store: Arc<FakeStore>,
    pub favorites: Arc<FakeFavorites>,
    pub api: Arc<FakeApi>,
    pub repo: TestRepository,
}

pub fn harness(api: FakeApi) -> Harness {
    init_tracing();
    let store = Arc::new(FakeStore::new());
    let favorites = Arc::new(FakeFavorites::new());
    let api = Arc::new(api);
    let repo = SessionRepository::new(
        Arc::clone(&store),
        Arc::clone(&favorites),
        Arc::clone(&api),
        WorkerPool::current().unwrap(),
        SessionMerger::new(jst()),
    );
    Harness {
        store,
        favorites,
        api,
        repo,
    }
}

// ---------------------------------------------------------------------------
// Stream helpers
// ---------------------------------------------------------------------------

/// Next item satisfying `pred`, skipping the rest. Panics after two seconds.
pub async fn next_matching<T>(
    stream: &mut SourceStream<Arc<T>>,
    mut pred: impl FnMut(&T) -> bool,
) -> Arc<T> {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let item = stream.next().await.expect("stream ended");
            if pred(&item) {
                return item;
            }
        }
    })
    .await
    .expect("timed out waiting for a matching item")
}

/// Assert that `stream` stays silent for a short while.
pub async fn assert_quiet<T: std::fmt::Debug>(stream: &mut SourceStream<T>) {
    let got = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
    assert!(got.is_err(), "expected no emission, got {got:?}");
}

/// Let in-flight recomputations land, then discard whatever they emitted.
pub async fn settle<T>(stream: &mut SourceStream<T>) {
    tokio::time::sleep(Duration::from_millis(100)).await;
    while let Some(Some(_)) = stream.next().now_or_never() {}
}
