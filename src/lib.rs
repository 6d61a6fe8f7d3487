//! Atelier: a content-creation assistant.
//!
//! Turns natural-language prompts into captioned images and videos using a
//! remote generative-AI provider, and records every result in a per-user
//! history log.
//!
//! # Quick Start
//!
//! ```no_run
//! use atelier::prelude::*;
//!
//! # async fn example() -> atelier::error::Result<()> {
//! let config = AtelierConfig::from_env()?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let session = SessionContext::anonymous();
//!
//! let request = GenerationRequest::builder()
//!     .prompt("a red bicycle")
//!     .variation_count(2)
//!     .build();
//! for image in orchestrator.generate_image_batch(&session, &request).await? {
//!     println!("{}", image.caption);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod media;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod sheet;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
