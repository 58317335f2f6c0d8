use serde::{Deserialize, Serialize};

/// A conference speaker. Sessions reference speakers by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub blog_url: Option<String>,
}
