//! Session feedback repository.

use std::sync::Arc;

use sched_core::entities::SessionFeedback;

use crate::ScheduleDb;
use crate::error::DatabaseError;
use crate::helpers::get_i32;

impl ScheduleDb {
    /// Store a feedback record, one per session.
    ///
    /// A second save for the same session overwrites the earlier record in
    /// place, keeping its position in the feedback list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert or the snapshot read fails; the
    /// stored feedback is unchanged in that case.
    pub async fn append_feedback(&self, feedback: &SessionFeedback) -> Result<(), DatabaseError> {
        let _guard = self.lock.lock().await;
        let tx = self.conn.transaction().await?;
        let written = match upsert(&tx, feedback).await {
            Ok(()) => self.load_feedback().await,
            Err(e) => Err(e),
        };
        let snapshot = match written {
            Ok(snapshot) => {
                tx.commit().await?;
                snapshot
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%rollback, "feedback rollback failed");
                }
                return Err(e);
            }
        };

        tracing::debug!(session_id = %feedback.session_id, "feedback saved");
        self.feeds.feedback.send_replace(Arc::new(snapshot));
        Ok(())
    }

    /// Read every stored feedback record in first-saved order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_feedback(&self) -> Result<Vec<SessionFeedback>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT session_id, session_title, overall, relevancy, as_expected,
                        difficulty, knowledgeable, comment, submitted
                 FROM session_feedback ORDER BY rowid",
                (),
            )
            .await?;

        let mut feedback = Vec::new();
        while let Some(row) = rows.next().await? {
            feedback.push(SessionFeedback {
                session_id: row.get::<String>(0)?,
                session_title: row.get::<String>(1)?,
                overall: get_i32(&row, 2)?,
                relevancy: get_i32(&row, 3)?,
                as_expected: get_i32(&row, 4)?,
                difficulty: get_i32(&row, 5)?,
                knowledgeable: get_i32(&row, 6)?,
                comment: row.get::<String>(7)?,
                submitted: row.get::<i64>(8)? != 0,
            });
        }
        Ok(feedback)
    }
}

/// Insert or overwrite the feedback row for its session.
async fn upsert(conn: &libsql::Connection, feedback: &SessionFeedback) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO session_feedback
            (session_id, session_title, overall, relevancy, as_expected,
             difficulty, knowledgeable, comment, submitted, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, datetime('now'))
         ON CONFLICT(session_id) DO UPDATE SET
            session_title = excluded.session_title,
            overall = excluded.overall,
            relevancy = excluded.relevancy,
            as_expected = excluded.as_expected,
            difficulty = excluded.difficulty,
            knowledgeable = excluded.knowledgeable,
            comment = excluded.comment,
            submitted = excluded.submitted,
            updated_at = excluded.updated_at",
        libsql::params![
            feedback.session_id.as_str(),
            feedback.session_title.as_str(),
            i64::from(feedback.overall),
            i64::from(feedback.relevancy),
            i64::from(feedback.as_expected),
            i64::from(feedback.difficulty),
            i64::from(feedback.knowledgeable),
            feedback.comment.as_str(),
            i64::from(feedback.submitted)
        ],
    )
    .await?;
    Ok(())
}
