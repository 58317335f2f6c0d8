//! Row types exchanged with the persistence and network adapters.
//!
//! `ScheduleResponse` is what the network adapter fetches and the persistence
//! adapter stores wholesale. `SessionRow` and `SpeakerRow` are what the
//! persistence adapter streams back: session rows come with their room and
//! topic already resolved, but speakers stay as id references for the merger
//! to join.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Room, Speaker, Topic};
use crate::enums::Level;
use crate::errors::CoreError;

/// A persisted speech session with room and topic resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room: Room,
    pub topic: Topic,
    pub level: Level,
    /// Ordered speaker references.
    pub speaker_ids: Vec<String>,
}

/// A persisted speaker profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeakerRow {
    pub id: String,
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub blog_url: Option<String>,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            tagline: row.tagline,
            image_url: row.image_url,
            twitter: row.twitter,
            github: row.github,
            blog_url: row.blog_url,
        }
    }
}

impl From<&SpeakerRow> for Speaker {
    fn from(row: &SpeakerRow) -> Self {
        row.clone().into()
    }
}

/// A session as the schedule endpoint delivers it: room and topic by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room_id: i32,
    pub topic_id: i32,
    pub level: Level,
    #[serde(default)]
    pub speaker_ids: Vec<String>,
}

/// The whole conference schedule as fetched from the remote endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub sessions: Vec<ScheduledSession>,
    #[serde(default)]
    pub speakers: Vec<SpeakerRow>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl ScheduleResponse {
    /// Check that every room, topic, and speaker a session references is
    /// part of the response.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for the first dangling reference.
    pub fn validate(&self) -> Result<(), CoreError> {
        let rooms: HashSet<i32> = self.rooms.iter().map(|r| r.id).collect();
        let topics: HashSet<i32> = self.topics.iter().map(|t| t.id).collect();
        let speakers: HashSet<&str> = self.speakers.iter().map(|s| s.id.as_str()).collect();

        for session in &self.sessions {
            if !rooms.contains(&session.room_id) {
                return Err(not_found("room", session.room_id));
            }
            if !topics.contains(&session.topic_id) {
                return Err(not_found("topic", session.topic_id));
            }
            if let Some(missing) = session
                .speaker_ids
                .iter()
                .find(|id| !speakers.contains(id.as_str()))
            {
                return Err(not_found("speaker", missing));
            }
        }
        Ok(())
    }
}

fn not_found(entity_type: &str, id: impl ToString) -> CoreError {
    CoreError::NotFound {
        entity_type: entity_type.to_string(),
        id: id.to_string(),
    }
}
