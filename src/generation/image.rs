//! Image batch path.

use futures::future::try_join_all;
use tracing::{info, warn};

use super::Orchestrator;
use crate::error::{AtelierError, Result};
use crate::media::Locator;
use crate::prompt::image_prompt;
use crate::session::SessionContext;
use crate::types::{ArtifactKind, GeneratedArtifact, GenerationRequest};

impl Orchestrator {
    /// Generate `variation_count` images and caption each one.
    ///
    /// Captions are requested concurrently, one per image, using the original
    /// prompt (not the overlay-augmented one). Results keep the provider's
    /// order. Any failure rejects the whole call, including a batch whose
    /// size differs from `variation_count`.
    pub async fn generate_image_batch(
        &self,
        session: &SessionContext,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedArtifact>> {
        let prompt = image_prompt(request);
        info!(
            provider = self.provider.provider_name(),
            count = request.variation_count,
            overlay = request.overlay().is_some(),
            "Submitting image batch"
        );

        let images = self
            .provider
            .submit_image_batch(&prompt, request.variation_count)
            .await
            .map_err(|e| {
                warn!(error = %e, "Image batch failed");
                e
            })?;

        if images.len() != request.variation_count as usize {
            warn!(
                requested = request.variation_count,
                returned = images.len(),
                "Provider returned a different number of images"
            );
            return Err(AtelierError::provider(
                self.provider.provider_name(),
                format!(
                    "Requested {} images, received {}",
                    request.variation_count,
                    images.len()
                ),
            ));
        }

        let captioned = images.into_iter().map(|image| async move {
            let caption = self
                .provider
                .submit_caption(&request.prompt, ArtifactKind::Image)
                .await?;
            let artifact = GeneratedArtifact {
                locator: Locator::data_url(&image.mime_type, &image.bytes),
                caption,
            };
            self.record(session, ArtifactKind::Image, &request.prompt, &artifact);
            Ok::<_, AtelierError>(artifact)
        });

        let artifacts = try_join_all(captioned)
            .await
            .map_err(|e| {
                warn!(error = %e, "Image caption failed");
                e
            })?;
        info!(count = artifacts.len(), "Image batch complete");
        Ok(artifacts)
    }
}
