use serde::{Deserialize, Serialize};

use super::{SpeechSession, Speaker};

/// Result of a one-shot search. The two lists are independent: a speaker match
/// does not pull in that speaker's sessions and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub sessions: Vec<SpeechSession>,
    pub speakers: Vec<Speaker>,
}
