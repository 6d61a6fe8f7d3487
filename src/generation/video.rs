//! Video path: submit, poll, fetch, caption.

use tracing::{debug, info, warn};

use super::progress::{
    poll_message, VideoPhase, CONSTRUCTING_PROMPT, FETCHING_VIDEO, SUBMITTING_REQUEST,
    WRITING_CAPTION,
};
use super::Orchestrator;
use crate::error::{AtelierError, Result};
use crate::prompt::video_prompt;
use crate::session::SessionContext;
use crate::types::{ArtifactKind, GeneratedArtifact, GenerationRequest};

const VIDEO_MIME: &str = "video/mp4";

impl Orchestrator {
    /// Generate one video, reporting progress through `on_progress`.
    ///
    /// `on_progress` is called synchronously before each phase starts and
    /// once per poll; the number of calls depends on provider latency. The
    /// job is refreshed at a fixed interval until it reports completion
    /// (or the poll policy's ceiling is hit). There is no cancellation:
    /// dropping the future stops listening but not the provider job.
    pub async fn generate_video_with_progress<F>(
        &self,
        session: &SessionContext,
        request: &GenerationRequest,
        mut on_progress: F,
    ) -> Result<GeneratedArtifact>
    where
        F: FnMut(&str) + Send,
    {
        let mut phase = VideoPhase::Submitting;
        match self.run_video(request, &mut on_progress, &mut phase).await {
            Ok(artifact) => {
                self.record(session, ArtifactKind::Video, &request.prompt, &artifact);
                info!(locator = %artifact.locator, "Video ready");
                Ok(artifact)
            }
            Err(e) => {
                warn!(%phase, category = %e.category(), error = %e, "Video generation failed");
                Err(e)
            }
        }
    }

    async fn run_video<F>(
        &self,
        request: &GenerationRequest,
        on_progress: &mut F,
        phase: &mut VideoPhase,
    ) -> Result<GeneratedArtifact>
    where
        F: FnMut(&str) + Send,
    {
        on_progress(CONSTRUCTING_PROMPT);
        let prompt = video_prompt(request);

        on_progress(SUBMITTING_REQUEST);
        info!(provider = self.provider.provider_name(), "Submitting video job");
        let mut operation = self.provider.submit_video_job(&prompt).await?;

        *phase = VideoPhase::Polling;
        let mut polls: u32 = 0;
        while !operation.done {
            if self.poll.exhausted(polls) {
                return Err(AtelierError::PollLimitExceeded {
                    operation: operation.name,
                    polls,
                });
            }
            on_progress(poll_message(polls as usize));
            tokio::time::sleep(self.poll.interval).await;
            operation = self.provider.refresh_video_job(&operation).await?;
            polls += 1;
            debug!(operation = %operation.name, poll = polls, done = operation.done, "Polled video job");
        }

        *phase = VideoPhase::Fetching;
        on_progress(FETCHING_VIDEO);
        if let Some(err) = operation.error {
            return Err(AtelierError::provider(
                self.provider.provider_name(),
                format!("Video job {} failed: {}", operation.name, err.message),
            ));
        }
        let uri = operation
            .result_uri
            .ok_or(AtelierError::MissingResult {
                operation: operation.name,
            })?;
        let bytes = self.provider.fetch_video_bytes(&uri).await?;
        let locator = self.blobs.insert(VIDEO_MIME, bytes);

        *phase = VideoPhase::Captioning;
        on_progress(WRITING_CAPTION);
        let caption = self
            .provider
            .submit_caption(&request.prompt, ArtifactKind::Video)
            .await?;

        *phase = VideoPhase::Done;
        Ok(GeneratedArtifact { locator, caption })
    }
}
