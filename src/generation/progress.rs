//! Progress messages reported while a video is generated.

use strum::{Display, IntoStaticStr};

pub const CONSTRUCTING_PROMPT: &str = "Constructing prompt...";
pub const SUBMITTING_REQUEST: &str = "Submitting request to the video model...";
pub const FETCHING_VIDEO: &str = "Fetching the generated video...";
pub const WRITING_CAPTION: &str = "Writing a caption...";

/// Cycled through while waiting on the provider, one per poll.
pub const POLL_MESSAGES: [&str; 5] = [
    "Warming up the cameras...",
    "Directing the scene...",
    "Rendering frames...",
    "Adding the finishing touches...",
    "Almost there, polishing the final cut...",
];

/// Message for the `index`-th poll. Depends only on the index, never on elapsed time.
pub fn poll_message(index: usize) -> &'static str {
    POLL_MESSAGES[index % POLL_MESSAGES.len()]
}

/// Stage of the video workflow. Used to label logs and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum VideoPhase {
    Submitting,
    Polling,
    Fetching,
    Captioning,
    Done,
}
