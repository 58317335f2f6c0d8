use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Room, Speaker, Topic};
use crate::enums::Level;

/// A talk given by one or more speakers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SpeechSession {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub room: Room,
    pub topic: Topic,
    pub level: Level,
    /// Speakers in the order the session row lists them.
    pub speakers: Vec<Speaker>,
    pub favorited: bool,
    /// Days since the earliest session date of the snapshot this value was
    /// merged from. `0` is the first conference day.
    pub day_offset: i64,
}

/// A non-speech slot such as the opening, lunch, or the party.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SpecialSession {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Venue-wide slots have no room.
    pub room: Option<Room>,
}

/// Any entry of the merged session list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    Speech(SpeechSession),
    Special(SpecialSession),
}

impl Session {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Speech(s) => &s.id,
            Self::Special(s) => &s.id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Speech(s) => &s.title,
            Self::Special(s) => &s.title,
        }
    }

    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        match self {
            Self::Speech(s) => s.start_time,
            Self::Special(s) => s.start_time,
        }
    }

    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        match self {
            Self::Speech(s) => s.end_time,
            Self::Special(s) => s.end_time,
        }
    }

    /// The session's room. Always `Some` for speech sessions.
    #[must_use]
    pub const fn room(&self) -> Option<&Room> {
        match self {
            Self::Speech(s) => Some(&s.room),
            Self::Special(s) => s.room.as_ref(),
        }
    }

    #[must_use]
    pub const fn as_speech(&self) -> Option<&SpeechSession> {
        match self {
            Self::Speech(s) => Some(s),
            Self::Special(_) => None,
        }
    }
}

impl From<SpeechSession> for Session {
    fn from(session: SpeechSession) -> Self {
        Self::Speech(session)
    }
}

impl From<SpecialSession> for Session {
    fn from(session: SpecialSession) -> Self {
        Self::Special(session)
    }
}
