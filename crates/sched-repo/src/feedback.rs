//! Feedback correlation: annotate stored feedback with session titles.

use std::future;
use std::sync::Arc;

use futures::stream::{Stream, StreamExt};
use sched_core::entities::SessionFeedback;
use sched_core::rows::SessionRow;

use crate::combine::zip_strict;
use crate::ports::SourceStream;

/// Copy each feedback's session title from the matching row.
///
/// Feedback for a session that is not in `rows` keeps the title it has.
#[must_use]
pub fn correlate(rows: &[SessionRow], feedback: &[SessionFeedback]) -> Vec<SessionFeedback> {
    feedback
        .iter()
        .map(|f| {
            let mut f = f.clone();
            if let Some(row) = rows.iter().find(|row| row.id == f.session_id) {
                f.session_title.clone_from(&row.title);
            }
            f
        })
        .collect()
}

/// Correlated feedback lists.
///
/// Strict pairing: each output needs a fresh session snapshot *and* a fresh
/// feedback snapshot. Empty session snapshots are not ready and never pair;
/// empty feedback snapshots are real values.
pub fn correlated(
    rows: SourceStream<Arc<Vec<SessionRow>>>,
    feedback: SourceStream<Arc<Vec<SessionFeedback>>>,
) -> impl Stream<Item = Vec<SessionFeedback>> + Send + 'static {
    let rows = rows.filter(|rows| future::ready(!rows.is_empty()));
    zip_strict(rows, feedback).map(|(rows, feedback)| {
        let out = correlate(&rows, &feedback);
        tracing::debug!(feedback = out.len(), "correlated feedback");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sched_core::entities::{Room, Topic};
    use sched_core::enums::Level;

    fn row(id: &str, title: &str) -> SessionRow {
        let start = Utc.with_ymd_and_hms(2018, 2, 8, 1, 0, 0).unwrap();
        SessionRow {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start_time: start,
            end_time: start,
            room: Room {
                id: 1,
                name: "Hall A".into(),
            },
            topic: Topic {
                id: 1,
                name: "Android".into(),
            },
            level: Level::Niche,
            speaker_ids: vec![],
        }
    }

    #[test]
    fn copies_matching_title() {
        let out = correlate(&[row("s1", "Coroutines")], &[SessionFeedback::new("s1")]);
        assert_eq!(out[0].session_title, "Coroutines");
    }

    #[test]
    fn unmatched_feedback_keeps_its_title() {
        let stale = SessionFeedback {
            session_title: "Old title".into(),
            ..SessionFeedback::new("gone")
        };
        let out = correlate(&[row("s1", "Coroutines")], &[stale.clone()]);
        assert_eq!(out, vec![stale]);
    }

    #[test]
    fn keeps_feedback_order_and_ratings() {
        let feedback = vec![
            SessionFeedback {
                overall: 4,
                ..SessionFeedback::new("s2")
            },
            SessionFeedback::new("s1"),
        ];
        let out = correlate(&[row("s1", "One"), row("s2", "Two")], &feedback);
        let titles: Vec<&str> = out.iter().map(|f| f.session_title.as_str()).collect();
        assert_eq!(titles, vec!["Two", "One"]);
        assert_eq!(out[0].overall, 4);
    }
}
