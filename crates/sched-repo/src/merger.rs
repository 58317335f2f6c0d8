//! Session merge: rows, speakers, and favorites into the unified list.

use std::collections::{HashMap, HashSet};
use std::future;
use std::sync::Arc;

use chrono::FixedOffset;
use futures::stream::{self, Stream, StreamExt};
use sched_core::entities::{Session, SpeechSession, Speaker};
use sched_core::rows::{SessionRow, SpeakerRow};

use crate::combine::combine_latest3;
use crate::error::{MergeError, RepositoryError};
use crate::ports::{FavoriteIds, SourceStream};
use crate::special::special_sessions;

/// Joins session rows with speakers and favorites, computes day offsets, and
/// sorts.
#[derive(Debug, Clone, Copy)]
pub struct SessionMerger {
    utc_offset: FixedOffset,
}

impl SessionMerger {
    /// `utc_offset` is the conference's local time, used to decide which
    /// calendar day a session falls on.
    #[must_use]
    pub const fn new(utc_offset: FixedOffset) -> Self {
        Self { utc_offset }
    }

    /// Merge one snapshot of each source.
    ///
    /// Speech sessions are sorted by start time, then room id, with the input
    /// order kept for full ties. Special sessions follow the speech sessions.
    ///
    /// # Errors
    ///
    /// Returns `MergeError::NoStartTime` if `rows` is empty.
    pub fn merge(
        &self,
        rows: &[SessionRow],
        speakers: &[SpeakerRow],
        favorites: &HashSet<String>,
    ) -> Result<Vec<Session>, MergeError> {
        let first_day = rows
            .iter()
            .map(|row| row.start_time.with_timezone(&self.utc_offset).date_naive())
            .min()
            .ok_or(MergeError::NoStartTime)?;

        let by_id: HashMap<&str, &SpeakerRow> =
            speakers.iter().map(|s| (s.id.as_str(), s)).collect();

        let mut speech: Vec<SpeechSession> = rows
            .iter()
            .map(|row| {
                let day = row.start_time.with_timezone(&self.utc_offset).date_naive();
                SpeechSession {
                    id: row.id.clone(),
                    title: row.title.clone(),
                    description: row.description.clone(),
                    start_time: row.start_time,
                    end_time: row.end_time,
                    room: row.room.clone(),
                    topic: row.topic.clone(),
                    level: row.level,
                    speakers: row
                        .speaker_ids
                        .iter()
                        .filter_map(|id| by_id.get(id.as_str()).copied())
                        .map(Speaker::from)
                        .collect(),
                    favorited: favorites.contains(&row.id),
                    day_offset: (day - first_day).num_days(),
                }
            })
            .collect();

        // `sort_by` is stable, so full ties keep row order.
        speech.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.room.id.cmp(&b.room.id))
        });

        Ok(speech
            .into_iter()
            .map(Session::Speech)
            .chain(special_sessions().iter().cloned().map(Session::Special))
            .collect())
    }

    /// The merged session list, recomputed on every change of any source.
    ///
    /// Latest-value combination. Empty row or speaker snapshots mean "not
    /// ready" and are dropped. Favorites start out empty so the first merge
    /// does not wait on the favorite store, and a favorite error counts as no
    /// favorites.
    pub fn merged(
        self,
        rows: SourceStream<Arc<Vec<SessionRow>>>,
        speakers: SourceStream<Arc<Vec<SpeakerRow>>>,
        favorites: SourceStream<Result<FavoriteIds, RepositoryError>>,
    ) -> impl Stream<Item = Vec<Session>> + Send + 'static {
        let rows = rows.filter(|rows| future::ready(!rows.is_empty()));
        let speakers = speakers.filter(|speakers| future::ready(!speakers.is_empty()));
        let favorites = stream::once(future::ready(FavoriteIds::default())).chain(favorites.map(
            |result| {
                result.unwrap_or_else(|e| {
                    tracing::warn!(%e, "favorites unavailable, merging without them");
                    FavoriteIds::default()
                })
            },
        ));

        combine_latest3(rows, speakers, favorites).filter_map(move |(rows, speakers, favorites)| {
            let merged = match self.merge(&rows, &speakers, &favorites) {
                Ok(sessions) => {
                    tracing::debug!(
                        sessions = sessions.len(),
                        speakers = speakers.len(),
                        favorites = favorites.len(),
                        "merged sessions"
                    );
                    Some(sessions)
                }
                Err(e) => {
                    tracing::error!(%e, "dropping session merge");
                    None
                }
            };
            future::ready(merged)
        })
    }
}
