mod engine;
mod error;
mod types;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode, ExtractionIssue};
pub use types::{CharacterField, CharacterStats, ChapterStats, Side, SideStats, StatsSnapshot};
