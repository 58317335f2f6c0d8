//! Domain values observed by consumers of the aggregation core.
//!
//! All structs derive `Serialize` and `Deserialize` so that presentation layers
//! can persist or ship them without re-deriving anything.

mod catalog;
mod feedback;
mod search;
mod session;
mod speaker;

pub use catalog::{Room, Topic};
pub use feedback::SessionFeedback;
pub use search::SearchResult;
pub use session::{Session, SpecialSession, SpeechSession};
pub use speaker::Speaker;
