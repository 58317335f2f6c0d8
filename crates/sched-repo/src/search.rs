//! Case-insensitive substring search over sessions and speakers.

use sched_core::entities::{SearchResult, Session, Speaker};

/// Match `query` against speech session titles and descriptions and against
/// speaker names and taglines. An empty query matches everything.
#[must_use]
pub fn search(query: &str, sessions: &[Session], speakers: &[Speaker]) -> SearchResult {
    let needle = query.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&needle);

    SearchResult {
        sessions: sessions
            .iter()
            .filter_map(Session::as_speech)
            .filter(|s| hit(&s.title) || hit(&s.description))
            .cloned()
            .collect(),
        speakers: speakers
            .iter()
            .filter(|s| hit(&s.name) || hit(&s.tagline))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sched_core::entities::{Room, SpecialSession, SpeechSession, Topic};
    use sched_core::enums::Level;

    fn talk(id: &str, title: &str, description: &str) -> Session {
        let start = Utc.with_ymd_and_hms(2018, 2, 8, 1, 0, 0).unwrap();
        Session::Speech(SpeechSession {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            start_time: start,
            end_time: start,
            room: Room {
                id: 1,
                name: "Hall A".into(),
            },
            topic: Topic {
                id: 1,
                name: "Kotlin".into(),
            },
            level: Level::Beginner,
            speakers: vec![],
            favorited: false,
            day_offset: 0,
        })
    }

    fn speaker(name: &str, tagline: &str) -> Speaker {
        Speaker {
            id: name.to_lowercase(),
            name: name.into(),
            tagline: tagline.into(),
            image_url: None,
            twitter: None,
            github: None,
            blog_url: None,
        }
    }

    fn fixture() -> (Vec<Session>, Vec<Speaker>) {
        let start = Utc.with_ymd_and_hms(2018, 2, 8, 3, 0, 0).unwrap();
        (
            vec![
                talk("1", "Kotlin Coroutines", "Structured concurrency"),
                talk("2", "Gradle tips", "Faster builds with KOTLIN DSL"),
                Session::Special(SpecialSession {
                    id: "lunch".into(),
                    title: "Kotlin Lunch".into(),
                    start_time: start,
                    end_time: start,
                    room: None,
                }),
            ],
            vec![
                speaker("Alice", "Android at scale"),
                speaker("Bob", "kotlin enthusiast"),
            ],
        )
    }

    #[rstest]
    #[case::empty_matches_all("", &["1", "2"], &["Alice", "Bob"])]
    #[case::case_insensitive("kOtLiN", &["1", "2"], &["Bob"])]
    #[case::title_only("gradle", &["2"], &[])]
    #[case::tagline("SCALE", &[], &["Alice"])]
    #[case::no_match("swift", &[], &[])]
    fn matches(#[case] query: &str, #[case] sessions: &[&str], #[case] speakers: &[&str]) {
        let (all_sessions, all_speakers) = fixture();
        let result = search(query, &all_sessions, &all_speakers);
        let got_sessions: Vec<&str> = result.sessions.iter().map(|s| s.id.as_str()).collect();
        let got_speakers: Vec<&str> = result.speakers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(got_sessions, sessions);
        assert_eq!(got_speakers, speakers);
    }
}
