//! In-process registry of downloaded media, addressed by `blob:` URLs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use super::Locator;

const BLOB_PREFIX: &str = "blob:atelier/";

/// Bytes held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

/// Maps `blob:` URLs to downloaded bytes for the lifetime of the process.
#[derive(Debug, Default)]
pub struct BlobStore {
    blobs: RwLock<HashMap<String, Blob>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes and return a fresh locator for them.
    pub fn insert(&self, mime_type: impl Into<String>, bytes: Vec<u8>) -> Locator {
        let url = format!("{BLOB_PREFIX}{}", Uuid::new_v4());
        let blob = Blob {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        };
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone(), blob);
        Locator::Blob(url)
    }

    pub fn get(&self, locator: &Locator) -> Option<Blob> {
        let Locator::Blob(url) = locator else {
            return None;
        };
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Release a blob. Returns false if it was unknown.
    pub fn revoke(&self, locator: &Locator) -> bool {
        let Locator::Blob(url) = locator else {
            return false;
        };
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
