//! Schedule repository.
//!
//! Stores a fetched `ScheduleResponse` as a wholesale replace of the rooms,
//! topics, speakers, sessions, and session/speaker link tables, and reads them
//! back as rows.

use std::collections::HashMap;

use sched_core::entities::{Room, Topic};
use sched_core::rows::{ScheduleResponse, SessionRow, SpeakerRow};

use crate::ScheduleDb;
use crate::error::DatabaseError;
use crate::helpers::{get_i32, get_opt_string, parse_datetime, parse_enum};

impl ScheduleDb {
    /// Replace every schedule table with the contents of `schedule`.
    ///
    /// Runs in a single transaction: either the whole schedule is replaced or
    /// nothing changes. The new snapshot is read back before commit, so a
    /// failed read also rolls the write back. Feedback and favorites are left
    /// untouched. Readers see the new rows only after commit.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Invalid` if the schedule has dangling
    /// references, or `DatabaseError` if any statement or the read-back fails
    /// (the transaction is rolled back).
    pub async fn replace_all(&self, schedule: &ScheduleResponse) -> Result<(), DatabaseError> {
        schedule.validate()?;

        let _guard = self.lock.lock().await;
        let tx = self.conn.transaction().await?;
        let written = match write_schedule(&tx, schedule).await {
            Ok(()) => self.load_schedule().await,
            Err(e) => Err(e),
        };
        let snapshot = match written {
            Ok(snapshot) => {
                tx.commit().await?;
                snapshot
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%rollback, "schedule rollback failed");
                }
                return Err(e);
            }
        };

        tracing::info!(
            sessions = schedule.sessions.len(),
            speakers = schedule.speakers.len(),
            rooms = schedule.rooms.len(),
            topics = schedule.topics.len(),
            "schedule replaced"
        );
        self.feeds.send_schedule(snapshot);
        Ok(())
    }

    /// Read all session rows in insertion order, rooms and topics resolved.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn load_session_rows(&self) -> Result<Vec<SessionRow>, DatabaseError> {
        let mut speaker_ids = self.load_session_speaker_ids().await?;

        let mut rows = self
            .conn
            .query(
                "SELECT s.id, s.title, s.description, s.start_time, s.end_time,
                        r.id, r.name, t.id, t.name, s.level
                 FROM sessions s
                 JOIN rooms r ON r.id = s.room_id
                 JOIN topics t ON t.id = s.topic_id
                 ORDER BY s.rowid",
                (),
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = row.get::<String>(0)?;
            sessions.push(SessionRow {
                speaker_ids: speaker_ids.remove(&id).unwrap_or_default(),
                id,
                title: row.get::<String>(1)?,
                description: row.get::<String>(2)?,
                start_time: parse_datetime(&row.get::<String>(3)?)?,
                end_time: parse_datetime(&row.get::<String>(4)?)?,
                room: Room {
                    id: get_i32(&row, 5)?,
                    name: row.get::<String>(6)?,
                },
                topic: Topic {
                    id: get_i32(&row, 7)?,
                    name: row.get::<String>(8)?,
                },
                level: parse_enum(&row.get::<String>(9)?)?,
            });
        }
        Ok(sessions)
    }

    /// Read all speaker rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_speaker_rows(&self) -> Result<Vec<SpeakerRow>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, tagline, image_url, twitter, github, blog_url
                 FROM speakers ORDER BY rowid",
                (),
            )
            .await?;

        let mut speakers = Vec::new();
        while let Some(row) = rows.next().await? {
            speakers.push(SpeakerRow {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
                tagline: row.get::<String>(2)?,
                image_url: get_opt_string(&row, 3)?,
                twitter: get_opt_string(&row, 4)?,
                github: get_opt_string(&row, 5)?,
                blog_url: get_opt_string(&row, 6)?,
            });
        }
        Ok(speakers)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_rooms(&self) -> Result<Vec<Room>, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT id, name FROM rooms ORDER BY id", ())
            .await?;
        let mut rooms = Vec::new();
        while let Some(row) = rows.next().await? {
            rooms.push(Room {
                id: get_i32(&row, 0)?,
                name: row.get::<String>(1)?,
            });
        }
        Ok(rooms)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_topics(&self) -> Result<Vec<Topic>, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT id, name FROM topics ORDER BY id", ())
            .await?;
        let mut topics = Vec::new();
        while let Some(row) = rows.next().await? {
            topics.push(Topic {
                id: get_i32(&row, 0)?,
                name: row.get::<String>(1)?,
            });
        }
        Ok(topics)
    }

    /// Speaker ids per session, in `position` order.
    async fn load_session_speaker_ids(&self) -> Result<HashMap<String, Vec<String>>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT session_id, speaker_id FROM session_speakers
                 ORDER BY session_id, position",
                (),
            )
            .await?;
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            map.entry(row.get::<String>(0)?)
                .or_default()
                .push(row.get::<String>(1)?);
        }
        Ok(map)
    }
}

/// Delete and re-insert every schedule table on `conn` (a transaction).
async fn write_schedule(
    conn: &libsql::Connection,
    schedule: &ScheduleResponse,
) -> Result<(), DatabaseError> {
    // Children first so foreign keys never dangle mid-transaction.
    for table in ["session_speakers", "sessions", "speakers", "topics", "rooms"] {
        conn.execute(&format!("DELETE FROM {table}"), ()).await?;
    }

    for room in &schedule.rooms {
        conn.execute(
            "INSERT INTO rooms (id, name) VALUES (?1, ?2)",
            libsql::params![i64::from(room.id), room.name.as_str()],
        )
        .await?;
    }

    for topic in &schedule.topics {
        conn.execute(
            "INSERT INTO topics (id, name) VALUES (?1, ?2)",
            libsql::params![i64::from(topic.id), topic.name.as_str()],
        )
        .await?;
    }

    for speaker in &schedule.speakers {
        conn.execute(
            "INSERT INTO speakers (id, name, tagline, image_url, twitter, github, blog_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                speaker.id.as_str(),
                speaker.name.as_str(),
                speaker.tagline.as_str(),
                speaker.image_url.as_deref(),
                speaker.twitter.as_deref(),
                speaker.github.as_deref(),
                speaker.blog_url.as_deref()
            ],
        )
        .await?;
    }

    for session in &schedule.sessions {
        conn.execute(
            "INSERT INTO sessions (id, title, description, start_time, end_time, room_id, topic_id, level)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                session.id.as_str(),
                session.title.as_str(),
                session.description.as_str(),
                session.start_time.to_rfc3339(),
                session.end_time.to_rfc3339(),
                i64::from(session.room_id),
                i64::from(session.topic_id),
                session.level.as_str()
            ],
        )
        .await?;

        for (position, speaker_id) in session.speaker_ids.iter().enumerate() {
            conn.execute(
                "INSERT INTO session_speakers (session_id, speaker_id, position) VALUES (?1, ?2, ?3)",
                libsql::params![
                    session.id.as_str(),
                    speaker_id.as_str(),
                    i64::try_from(position).unwrap_or(i64::MAX)
                ],
            )
            .await?;
        }
    }

    Ok(())
}
