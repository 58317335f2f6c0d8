//! Fixed non-speech sessions appended to every merged list.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sched_core::entities::{Room, SpecialSession};

/// Venue-wide slots happen in the main hall or nowhere in particular.
const HALL_ID: i32 = 0;

static SPECIAL_SESSIONS: LazyLock<Vec<SpecialSession>> = LazyLock::new(build);

/// The curated special sessions, built on first use.
#[must_use]
pub fn special_sessions() -> &'static [SpecialSession] {
    &SPECIAL_SESSIONS
}

fn build() -> Vec<SpecialSession> {
    let hall = || {
        Some(Room {
            id: HALL_ID,
            name: "Hall".to_string(),
        })
    };
    vec![
        special("100000", "Welcome Talk", (8, 10, 0), (8, 10, 20), hall()),
        special("100001", "Lunch", (8, 13, 0), (8, 14, 0), None),
        special("100002", "Party", (8, 19, 0), (8, 21, 0), None),
        special("100100", "Lunch", (9, 13, 0), (9, 14, 0), None),
        special("100101", "Closing", (9, 18, 30), (9, 18, 50), hall()),
    ]
}

/// Conference days are 2018-02-08 and 2018-02-09, local time UTC+09:00.
fn special(
    id: &str,
    title: &str,
    start: (u32, u32, u32),
    end: (u32, u32, u32),
    room: Option<Room>,
) -> SpecialSession {
    SpecialSession {
        id: id.to_string(),
        title: title.to_string(),
        start_time: jst(start),
        end_time: jst(end),
        room,
    }
}

fn jst((day, hour, minute): (u32, u32, u32)) -> DateTime<Utc> {
    FixedOffset::east_opt(9 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2018, 2, day, hour, minute, 0).single())
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |t| t.with_timezone(&Utc))
}
