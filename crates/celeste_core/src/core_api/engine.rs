use std::fs;
use std::path::Path;

use log::info;

use crate::document::SaveDocument;
use crate::extract::{chapter_stats, character_stats};

use super::error::{CoreError, CoreErrorCode, ExtractionIssue};
use super::types::{ChapterStats, StatsSnapshot};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// The result of reading one save: an immutable snapshot plus every field
/// that had to be defaulted along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    snapshot: StatsSnapshot,
    issues: Vec<ExtractionIssue>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_str(&self, text: &str) -> Result<Session, CoreError> {
        let document = SaveDocument::parse(text)?;
        Ok(session_from_document(&document))
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let text = std::str::from_utf8(bytes.as_ref()).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("save is not valid UTF-8: {e}"))
        })?;
        self.open_str(text)
    }

    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<Session, CoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        self.open_bytes(bytes)
    }
}

impl Session {
    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    pub fn issues(&self) -> &[ExtractionIssue] {
        &self.issues
    }

    pub fn chapter(&self, id: i32) -> Option<&ChapterStats> {
        self.snapshot.chapter(id)
    }

    pub fn into_snapshot(self) -> StatsSnapshot {
        self.snapshot
    }
}

fn session_from_document(document: &SaveDocument) -> Session {
    let mut issues = Vec::new();
    let character = character_stats(document, &mut issues);
    let chapters = chapter_stats(document, &mut issues);

    info!(
        "extracted {} chapters ({} fields defaulted)",
        chapters.len(),
        issues.len()
    );

    Session {
        snapshot: StatsSnapshot {
            character,
            chapters,
        },
        issues,
    }
}
