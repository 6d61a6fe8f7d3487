//! Generation request.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A single user request, immutable once handed to the orchestrator.
///
/// ```
/// use atelier::types::GenerationRequest;
///
/// let request = GenerationRequest::builder()
///     .prompt("a red bicycle")
///     .overlay("SALE")
///     .variation_count(2)
///     .build();
/// assert_eq!(request.overlay(), Some("SALE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[builder(into)]
    pub prompt: String,
    /// Text to render onto generated images.
    #[builder(into)]
    pub overlay: Option<String>,
    /// Soundtrack direction for generated video.
    #[builder(into)]
    pub music_hint: Option<String>,
    /// Number of image variations. Ignored by the video path.
    #[builder(default = 1)]
    #[serde(default = "default_variation_count")]
    pub variation_count: u32,
}

fn default_variation_count() -> u32 {
    1
}

impl GenerationRequest {
    /// Shorthand for a prompt-only request with one variation.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::builder().prompt(prompt).build()
    }

    /// Overlay text, treating blank strings as absent.
    pub fn overlay(&self) -> Option<&str> {
        non_blank(self.overlay.as_deref())
    }

    /// Music hint, treating blank strings as absent.
    pub fn music_hint(&self) -> Option<&str> {
        non_blank(self.music_hint.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
