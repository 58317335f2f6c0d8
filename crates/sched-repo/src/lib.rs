//! # sched-repo
//!
//! Reactive aggregation of the conference schedule.
//!
//! [`SessionRepository`] merges session rows, speaker rows, and favorites into
//! one continuously updated session list, derives room, topic, speaker, and
//! level groupings from it, correlates stored feedback with session titles,
//! and answers one-shot searches. Writes go back through the same ports and
//! show up in the feeds once the store publishes its next snapshot.
//!
//! Two combination rules are used and named at each call site:
//! [`combine::combine_latest3`] for the session merge and
//! [`combine::zip_strict`] for feedback correlation.

mod adapters;
pub mod combine;
pub mod error;
pub mod feed;
pub mod feedback;
pub mod merger;
mod mutations;
pub mod ports;
mod repository;
pub mod search;
pub mod special;
pub mod views;
pub mod worker;

pub use error::{MergeError, RepositoryError};
pub use feed::Feed;
pub use merger::SessionMerger;
pub use repository::{LocalRepository, SessionRepository};
pub use worker::WorkerPool;
