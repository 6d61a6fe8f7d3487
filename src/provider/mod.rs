//! Generation provider trait and implementations.

pub mod http;

#[cfg(feature = "google")]
pub mod google;

use async_trait::async_trait;

use crate::config::AtelierConfig;
use crate::error::AtelierError;
use crate::types::{ArtifactKind, GeneratedImage, VideoOperation};

/// Remote service that synthesises media and captions.
///
/// Every method is a single request/response exchange. The video pair
/// (`submit_video_job` / `refresh_video_job`) is the only polling protocol.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;

    /// Generate `count` images for one prompt in a single call.
    async fn submit_image_batch(
        &self,
        prompt: &str,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, AtelierError>;

    /// Write a caption for media generated from `prompt`.
    async fn submit_caption(&self, prompt: &str, kind: ArtifactKind)
        -> Result<String, AtelierError>;

    /// Start an asynchronous video job.
    async fn submit_video_job(&self, prompt: &str) -> Result<VideoOperation, AtelierError>;

    /// Fetch a fresh snapshot of a video job.
    async fn refresh_video_job(
        &self,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, AtelierError>;

    /// Download a finished video.
    async fn fetch_video_bytes(&self, uri: &str) -> Result<Vec<u8>, AtelierError>;
}

/// Build the provider selected by enabled features from `config`.
#[allow(unused_variables)]
pub fn create_provider(config: &AtelierConfig) -> Result<Box<dyn GenerationProvider>, AtelierError> {
    #[cfg(feature = "google")]
    {
        Ok(Box::new(google::GoogleProvider::from_config(config)?))
    }
    #[cfg(not(feature = "google"))]
    {
        Err(AtelierError::Configuration(
            "No generation provider enabled via feature flags".into(),
        ))
    }
}
