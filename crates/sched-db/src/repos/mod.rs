//! Repository modules implementing reads and writes for every table group.
//!
//! Each module adds methods to `ScheduleDb` via `impl ScheduleDb` blocks.
//! Public write methods take the connection lock, commit, then republish the
//! affected snapshots.

pub mod favorite;
pub mod feedback;
pub mod schedule;
