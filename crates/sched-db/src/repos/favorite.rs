//! Favorite repository.

use crate::ScheduleDb;
use crate::error::DatabaseError;

impl ScheduleDb {
    /// Flip favorite membership of `session_id` and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction fails; the favorite set is
    /// unchanged in that case.
    pub async fn toggle_favorite(&self, session_id: &str) -> Result<bool, DatabaseError> {
        let _guard = self.lock.lock().await;
        let tx = self.conn.transaction().await?;
        let was_favorite = match flip(&tx, session_id).await {
            Ok(was_favorite) => {
                tx.commit().await?;
                was_favorite
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%rollback, "favorite rollback failed");
                }
                return Err(e);
            }
        };

        let favorited = !was_favorite;
        tracing::debug!(session_id, favorited, "favorite toggled");
        self.publish_favorites().await;
        Ok(favorited)
    }

    /// Read the favorite session ids in the order they were marked.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_favorites(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT session_id FROM favorites ORDER BY rowid", ())
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }
}

/// Insert or delete the favorite row; returns whether it existed before.
async fn flip(conn: &libsql::Connection, session_id: &str) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM favorites WHERE session_id = ?1", [session_id])
        .await?;
    let was_favorite = rows.next().await?.is_some();
    drop(rows);

    if was_favorite {
        conn.execute("DELETE FROM favorites WHERE session_id = ?1", [session_id])
            .await?;
    } else {
        conn.execute("INSERT INTO favorites (session_id) VALUES (?1)", [session_id])
            .await?;
    }
    Ok(was_favorite)
}
