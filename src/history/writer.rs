//! Detached history writes whose failures go to an [`ErrorSink`].

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error};

use super::HistoryRecorder;
use crate::error::AtelierError;
use crate::session::UserId;
use crate::types::NewHistoryEntry;

/// Receives history failures that are never surfaced to the caller.
pub trait ErrorSink: Send + Sync {
    fn report(&self, user: &UserId, error: &AtelierError);
}

/// Default sink: logs at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, user: &UserId, error: &AtelierError) {
        error!(user = %user, category = %error.category(), error = %error, "History write failed");
    }
}

/// Hands entries to a recorder on a detached task.
///
/// Clones share one task set, so [`flush`](Self::flush) on any clone waits
/// for writes started through all of them.
#[derive(Clone)]
pub struct HistoryWriter {
    recorder: Arc<dyn HistoryRecorder>,
    sink: Arc<dyn ErrorSink>,
    tasks: TaskTracker,
}

impl HistoryWriter {
    pub fn new(recorder: Arc<dyn HistoryRecorder>) -> Self {
        Self {
            recorder,
            sink: Arc::new(TracingErrorSink),
            tasks: TaskTracker::new(),
        }
    }

    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn recorder(&self) -> &Arc<dyn HistoryRecorder> {
        &self.recorder
    }

    /// Spawn the append and return immediately.
    ///
    /// The returned handle may be dropped. Writes still pending when the
    /// runtime shuts down are lost unless [`flush`](Self::flush) ran first.
    /// Must be called from within a tokio runtime.
    pub fn record(&self, user: &UserId, entry: NewHistoryEntry) -> JoinHandle<()> {
        let recorder = Arc::clone(&self.recorder);
        let sink = Arc::clone(&self.sink);
        let user = user.clone();
        self.tasks.spawn(async move {
            match recorder.append(&user, entry).await {
                Ok(stored) => debug!(user = %user, id = %stored.id, kind = %stored.kind, "Recorded history entry"),
                Err(e) => {
                    let e = match e {
                        AtelierError::History(_) => e,
                        other => AtelierError::History(other.to_string()),
                    };
                    sink.report(&user, &e);
                }
            }
        })
    }

    /// Wait for every write spawned so far. Call before the runtime shuts down.
    ///
    /// Not meant to be awaited from several clones at once.
    pub async fn flush(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Writes still in flight.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}
