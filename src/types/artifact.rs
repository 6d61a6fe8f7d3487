//! Generated media results.

use serde::{Deserialize, Serialize};

use crate::media::Locator;

/// Raw image bytes returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A finished piece of media and its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub locator: Locator,
    pub caption: String,
}
