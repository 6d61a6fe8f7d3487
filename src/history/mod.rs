//! Per-user append-only history of generated media.

pub mod file;
pub mod memory;
pub mod writer;

pub use file::FileHistory;
pub use memory::InMemoryHistory;
pub use writer::{ErrorSink, HistoryWriter, TracingErrorSink};

use async_trait::async_trait;

use crate::error::AtelierError;
use crate::session::UserId;
use crate::types::{HistoryEntry, NewHistoryEntry};

/// Storage for finished generations.
///
/// Appends from concurrent generations may interleave; no ordering is promised.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    /// Store an entry, returning it with its assigned id and timestamp.
    async fn append(&self, user: &UserId, entry: NewHistoryEntry)
        -> Result<HistoryEntry, AtelierError>;

    /// Entries for a user, newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<HistoryEntry>, AtelierError>;
}
