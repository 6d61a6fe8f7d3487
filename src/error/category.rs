//! Error classification.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Broad failure class, used to decide who reports what.
///
/// Only [`ErrorCategory::ProviderCall`] and [`ErrorCategory::MissingResult`]
/// ever reject an orchestrator call. [`ErrorCategory::HistoryWrite`] failures
/// are reported to an [`ErrorSink`](crate::history::ErrorSink) and never reach
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// Network or provider failure during submit, poll, fetch or caption.
    ProviderCall,
    /// The provider finished a job but returned nothing usable.
    MissingResult,
    /// A result could not be recorded in the user's history.
    HistoryWrite,
    Configuration,
    InvalidInput,
}
