//! Long-running provider job handles.

use serde::{Deserialize, Serialize};

/// Snapshot of an asynchronous video job.
///
/// Each refresh yields a new snapshot; snapshots are never updated in place.
/// Once `done` is true the snapshot is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOperation {
    /// Provider continuation token (e.g. `models/veo/operations/abc`).
    pub name: String,
    pub done: bool,
    /// Remote location of the finished video, when the provider supplied one.
    pub result_uri: Option<String>,
    pub error: Option<OperationError>,
}

impl VideoOperation {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            result_uri: None,
            error: None,
        }
    }

    pub fn completed(name: impl Into<String>, result_uri: Option<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result_uri,
            error: None,
        }
    }
}

/// Error object attached to a finished operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    pub code: Option<i32>,
    pub message: String,
}
