//! Convenience re-exports for common use.

pub use crate::config::AtelierConfig;
pub use crate::error::{AtelierError, ErrorCategory, Result};
pub use crate::generation::{Orchestrator, PollPolicy};
pub use crate::history::{HistoryRecorder, HistoryWriter, InMemoryHistory};
pub use crate::media::{BlobStore, Locator};
pub use crate::provider::GenerationProvider;
pub use crate::session::{SessionContext, SessionManager, UserIdentity};
pub use crate::types::{ArtifactKind, GeneratedArtifact, GenerationRequest, HistoryEntry};
