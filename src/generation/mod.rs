//! Generation orchestrator: image batches and long-running video jobs.
//!
//! ```no_run
//! use atelier::prelude::*;
//!
//! # async fn example() -> atelier::error::Result<()> {
//! let config = AtelierConfig::from_env()?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let session = SessionContext::signed_in(UserIdentity::new("ada"));
//!
//! let request = GenerationRequest::builder().prompt("waves at dusk").build();
//! let video = orchestrator
//!     .generate_video_with_progress(&session, &request, |msg| println!("{msg}"))
//!     .await?;
//! println!("{}: {}", video.locator, video.caption);
//! # Ok(())
//! # }
//! ```

mod image;
pub mod poll;
pub mod progress;
mod video;

pub use poll::PollPolicy;
pub use progress::{poll_message, VideoPhase, POLL_MESSAGES};

use std::sync::Arc;

use crate::config::AtelierConfig;
use crate::error::Result;
use crate::history::{FileHistory, HistoryWriter};
use crate::media::BlobStore;
use crate::provider::{create_provider, GenerationProvider};
use crate::session::SessionContext;
use crate::types::{ArtifactKind, GeneratedArtifact, NewHistoryEntry};

/// Drives single generation requests through a [`GenerationProvider`].
///
/// Holds no per-request state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct Orchestrator {
    provider: Arc<dyn GenerationProvider>,
    history: HistoryWriter,
    blobs: Arc<BlobStore>,
    poll: PollPolicy,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn GenerationProvider>, history: HistoryWriter) -> Self {
        Self {
            provider,
            history,
            blobs: Arc::new(BlobStore::new()),
            poll: PollPolicy::default(),
        }
    }

    /// Provider from enabled features, file-backed history under `history_dir`.
    pub fn from_config(config: &AtelierConfig) -> Result<Self> {
        let provider: Arc<dyn GenerationProvider> = Arc::from(create_provider(config)?);
        let history = HistoryWriter::new(Arc::new(FileHistory::new(&config.history_dir)));
        Ok(Self::new(provider, history).with_poll_policy(PollPolicy::from_config(config)))
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_blob_store(mut self, blobs: Arc<BlobStore>) -> Self {
        self.blobs = blobs;
        self
    }

    pub fn blobs(&self) -> &Arc<BlobStore> {
        &self.blobs
    }

    pub fn history(&self) -> &HistoryWriter {
        &self.history
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Fire-and-forget write for signed-in sessions.
    fn record(
        &self,
        session: &SessionContext,
        kind: ArtifactKind,
        prompt: &str,
        artifact: &GeneratedArtifact,
    ) {
        if let Some(user) = session.user_id() {
            let _detached = self
                .history
                .record(user, NewHistoryEntry::new(kind, prompt, artifact.clone()));
        }
    }
}
