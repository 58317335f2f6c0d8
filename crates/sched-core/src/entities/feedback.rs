use serde::{Deserialize, Serialize};

/// Feedback a user left for a session.
///
/// Ratings are on a 1–5 scale; `0` means the question was left unanswered.
/// `session_title` is denormalized: it is filled in from the session rows when
/// feedback is correlated and is empty on freshly created records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionFeedback {
    pub session_id: String,
    pub session_title: String,
    pub overall: i32,
    pub relevancy: i32,
    pub as_expected: i32,
    pub difficulty: i32,
    pub knowledgeable: i32,
    pub comment: String,
    pub submitted: bool,
}

impl SessionFeedback {
    /// Create an empty feedback record for `session_id`.
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Whether every rating question has been answered.
    #[must_use]
    pub const fn is_fully_rated(&self) -> bool {
        self.overall > 0
            && self.relevancy > 0
            && self.as_expected > 0
            && self.difficulty > 0
            && self.knowledgeable > 0
    }
}
