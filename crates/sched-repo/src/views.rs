//! Grouped views over the merged session list.
//!
//! Keys appear in the order they are first seen in the merged list, and each
//! group keeps merged order.

use indexmap::IndexMap;
use sched_core::entities::{Room, Session, SpeechSession, Speaker, Topic};
use sched_core::enums::Level;

pub type RoomSessions = IndexMap<Room, Vec<Session>>;
pub type TopicSessions = IndexMap<Topic, Vec<SpeechSession>>;
pub type SpeakerSessions = IndexMap<Speaker, Vec<SpeechSession>>;
pub type LevelSessions = IndexMap<Level, Vec<SpeechSession>>;

/// Every session that has a room, grouped by room.
#[must_use]
pub fn by_room(sessions: &[Session]) -> RoomSessions {
    let mut groups = RoomSessions::new();
    for session in sessions {
        let room = match session {
            Session::Speech(s) => &s.room,
            Session::Special(s) => match &s.room {
                Some(room) => room,
                None => continue,
            },
        };
        groups.entry(room.clone()).or_default().push(session.clone());
    }
    groups
}

#[must_use]
pub fn by_topic(sessions: &[Session]) -> TopicSessions {
    let mut groups = TopicSessions::new();
    for s in speech(sessions) {
        groups.entry(s.topic.clone()).or_default().push(s.clone());
    }
    groups
}

/// A session with several speakers is listed under each of them.
#[must_use]
pub fn by_speaker(sessions: &[Session]) -> SpeakerSessions {
    let mut groups = SpeakerSessions::new();
    for s in speech(sessions) {
        for speaker in &s.speakers {
            groups.entry(speaker.clone()).or_default().push(s.clone());
        }
    }
    groups
}

#[must_use]
pub fn by_level(sessions: &[Session]) -> LevelSessions {
    let mut groups = LevelSessions::new();
    for s in speech(sessions) {
        groups.entry(s.level).or_default().push(s.clone());
    }
    groups
}

fn speech(sessions: &[Session]) -> impl Iterator<Item = &SpeechSession> {
    sessions.iter().filter_map(|session| match session {
        Session::Speech(s) => Some(s),
        Session::Special(_) => None,
    })
}
