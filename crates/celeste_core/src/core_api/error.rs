use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Parse,
}

/// A failure that prevents any snapshot from being produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Parse, message)
    }
}

/// A missing piece of the save that was recovered with a default value.
///
/// `position` is the zero-based index of the chapter node among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ExtractionIssue {
    #[error("missing <{tag}> element")]
    MissingNode { tag: String },
    #[error("<{tag}> has no text content")]
    MissingText { tag: String },
    #[error("missing <{tag}> container")]
    MissingContainer { tag: String },
    #[error("chapter at position {position} has no ID attribute, using -1")]
    MissingId { position: usize },
    #[error("chapter at position {position} has non-numeric ID {raw:?}, using -1")]
    InvalidId { position: usize, raw: String },
    #[error("chapter at position {position} is missing the {attribute} attribute")]
    MissingAttribute { position: usize, attribute: String },
    #[error("chapter at position {position} has no {side} side node")]
    MissingSide { position: usize, side: Side },
}

impl ExtractionIssue {
    /// Name of the document field that could not be read.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingNode { tag }
            | Self::MissingText { tag }
            | Self::MissingContainer { tag } => tag,
            Self::MissingId { .. } | Self::InvalidId { .. } => "ID",
            Self::MissingAttribute { attribute, .. } => attribute,
            Self::MissingSide { .. } => "AreaModeStats",
        }
    }
}
