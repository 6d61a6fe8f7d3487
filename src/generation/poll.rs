//! Fixed-interval polling policy for long-running jobs.

use std::time::Duration;

use crate::config::{AtelierConfig, DEFAULT_POLL_INTERVAL};

/// How often to refresh a video job, and optionally when to give up.
///
/// The interval is constant; there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Maximum number of refreshes. `None` polls until the job reports completion.
    pub max_polls: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }
}

impl PollPolicy {
    pub fn from_config(config: &AtelierConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_polls: config.max_polls,
        }
    }

    /// Whether `polls_done` refreshes already reach the ceiling.
    pub fn exhausted(&self, polls_done: u32) -> bool {
        self.max_polls.is_some_and(|max| polls_done >= max)
    }
}
