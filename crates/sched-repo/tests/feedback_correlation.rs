//! Strict pairing of session snapshots with feedback snapshots.

mod common;

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use sched_core::entities::SessionFeedback;
use sched_core::rows::SessionRow;
use sched_repo::feedback::correlated;
use sched_repo::ports::SourceStream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use common::{FakeApi, assert_quiet, at, harness, next_matching, row};

type Rows = Arc<Vec<SessionRow>>;
type Feedback = Arc<Vec<SessionFeedback>>;

struct Sources {
    rows: mpsc::UnboundedSender<Rows>,
    feedback: mpsc::UnboundedSender<Feedback>,
    out: SourceStream<Vec<SessionFeedback>>,
}

fn sources() -> Sources {
    let (rows, rows_rx) = mpsc::unbounded_channel();
    let (feedback, feedback_rx) = mpsc::unbounded_channel();
    let out = correlated(
        UnboundedReceiverStream::new(rows_rx).boxed(),
        UnboundedReceiverStream::new(feedback_rx).boxed(),
    )
    .boxed();
    Sources {
        rows,
        feedback,
        out,
    }
}

fn titled(id: &str, title: &str) -> Rows {
    let mut r = row(id, at(8, 1), 1, &[]);
    r.title = title.into();
    Arc::new(vec![r])
}

fn feedback(ids: &[&str]) -> Feedback {
    Arc::new(ids.iter().map(|id| SessionFeedback::new(*id)).collect())
}

fn titles(out: &[SessionFeedback]) -> Vec<&str> {
    out.iter().map(|f| f.session_title.as_str()).collect()
}

async fn next(s: &mut Sources) -> Vec<SessionFeedback> {
    tokio::time::timeout(std::time::Duration::from_secs(2), s.out.next())
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn silent_until_both_sides_emit() {
    let mut s = sources();
    s.feedback.send(feedback(&["s1"])).unwrap();
    assert_quiet(&mut s.out).await;

    s.rows.send(titled("s1", "Coroutines")).unwrap();
    assert_eq!(titles(&next(&mut s).await), vec!["Coroutines"]);
}

#[tokio::test]
async fn later_feedback_pairs_with_the_newer_session_snapshot() {
    let mut s = sources();
    s.rows.send(titled("s1", "Old title")).unwrap();
    s.feedback.send(feedback(&["s1"])).unwrap();
    assert_eq!(titles(&next(&mut s).await), vec!["Old title"]);

    s.rows.send(titled("s1", "New title")).unwrap();
    s.feedback.send(feedback(&["s1"])).unwrap();
    assert_eq!(titles(&next(&mut s).await), vec!["New title"]);
}

#[tokio::test]
async fn stalled_session_side_stalls_output() {
    let mut s = sources();
    s.rows.send(titled("s1", "Coroutines")).unwrap();
    s.feedback.send(feedback(&[])).unwrap();
    assert_eq!(next(&mut s).await, vec![]);

    s.feedback.send(feedback(&["s1"])).unwrap();
    s.feedback.send(feedback(&["s1", "s2"])).unwrap();
    assert_quiet(&mut s.out).await;

    // The queued feedback pairs in arrival order.
    s.rows.send(titled("s1", "Coroutines")).unwrap();
    assert_eq!(next(&mut s).await.len(), 1);
    s.rows.send(titled("s1", "Coroutines")).unwrap();
    assert_eq!(next(&mut s).await.len(), 2);
}

#[tokio::test]
async fn empty_session_snapshot_never_pairs() {
    let mut s = sources();
    s.rows.send(Arc::new(vec![])).unwrap();
    s.feedback.send(feedback(&["s1"])).unwrap();
    assert_quiet(&mut s.out).await;

    s.rows.send(titled("s1", "Coroutines")).unwrap();
    assert_eq!(titles(&next(&mut s).await), vec!["Coroutines"]);
}

#[tokio::test]
async fn unknown_session_keeps_stored_title() {
    let mut s = sources();
    s.rows.send(titled("s1", "Coroutines")).unwrap();
    s.feedback
        .send(Arc::new(vec![SessionFeedback {
            session_title: "Removed talk".into(),
            ..SessionFeedback::new("gone")
        }]))
        .unwrap();
    assert_eq!(titles(&next(&mut s).await), vec!["Removed talk"]);
}

#[tokio::test]
async fn repository_feed_annotates_saved_feedback() {
    let h = harness(FakeApi::serving(None));
    let mut out = h.repo.session_feedbacks().subscribe();

    // The store's empty feedback snapshot pairs with the first session rows.
    h.store.set_sessions(vec![row("s1", at(8, 1), 1, &[])]);
    let first = next_matching(&mut out, |_| true).await;
    assert!(first.is_empty());

    h.repo
        .save_session_feedback(&SessionFeedback {
            overall: 5,
            ..SessionFeedback::new("s1")
        })
        .await
        .unwrap();
    h.store.set_sessions(vec![row("s1", at(8, 1), 1, &[])]);

    let annotated = next_matching(&mut out, |f| !f.is_empty()).await;
    assert_eq!(titles(&annotated), vec!["Talk s1"]);
    assert_eq!(annotated[0].overall, 5);
}
