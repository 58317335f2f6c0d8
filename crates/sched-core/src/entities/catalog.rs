use serde::{Deserialize, Serialize};

/// A room sessions take place in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Room {
    pub id: i32,
    pub name: String,
}

/// A topic (track) a speech session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Topic {
    pub id: i32,
    pub name: String,
}
