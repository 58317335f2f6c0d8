//! Enums shared by sessions and rows.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! so the same string is used on the wire and in SQL storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target audience level of a speech session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    IntermediateOrExpert,
    Niche,
}

impl Level {
    /// All levels, in declaration order.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::IntermediateOrExpert, Self::Niche];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::IntermediateOrExpert => "intermediate_or_expert",
            Self::Niche => "niche",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
