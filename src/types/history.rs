//! History log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use super::GeneratedArtifact;
use crate::media::Locator;

/// Kind of media a history entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
    Image,
    Video,
}

/// What the orchestrator hands to a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub kind: ArtifactKind,
    pub prompt: String,
    pub artifact: GeneratedArtifact,
}

impl NewHistoryEntry {
    pub fn new(kind: ArtifactKind, prompt: impl Into<String>, artifact: GeneratedArtifact) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            artifact,
        }
    }

    /// Stamp the entry with a fresh id and the current time.
    pub fn stamp(self) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            kind: self.kind,
            prompt: self.prompt,
            locator: self.artifact.locator,
            caption: self.artifact.caption,
            created_at: Utc::now(),
        }
    }
}

/// A stored history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub kind: ArtifactKind,
    pub prompt: String,
    pub locator: Locator,
    pub caption: String,
    pub created_at: DateTime<Utc>,
}
