//! Media locators and the in-process blob store.

pub mod blob;

pub use blob::{Blob, BlobStore};

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Where a generated artifact can be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scheme", content = "url", rename_all = "snake_case")]
pub enum Locator {
    /// Self-contained `data:` URL carrying the bytes inline.
    Data(String),
    /// `blob:` URL resolvable through a [`BlobStore`].
    Blob(String),
}

impl Locator {
    /// Build a `data:` URL from raw bytes. Identical input gives an identical URL.
    pub fn data_url(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::Data(format!("data:{mime_type};base64,{encoded}"))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Data(url) | Self::Blob(url) => url,
        }
    }

    /// Decode the inline payload of a `data:` URL.
    pub fn decode_data(&self) -> Option<(String, Vec<u8>)> {
        let Self::Data(url) = self else {
            return None;
        };
        let rest = url.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .ok()?;
        Some((mime_type.to_string(), bytes))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
