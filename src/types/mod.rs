//! Core types for Atelier.

pub mod artifact;
pub mod history;
pub mod operation;
pub mod request;

pub use artifact::{GeneratedArtifact, GeneratedImage};
pub use history::{ArtifactKind, HistoryEntry, NewHistoryEntry};
pub use operation::{OperationError, VideoOperation};
pub use request::GenerationRequest;
