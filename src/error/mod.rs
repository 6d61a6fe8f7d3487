//! Error types for Atelier.

pub mod category;

pub use category::ErrorCategory;

use thiserror::Error;

/// Primary error type for all Atelier operations.
#[derive(Error, Debug)]
pub enum AtelierError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("Operation {operation} completed without a result")]
    MissingResult { operation: String },

    #[error("Operation {operation} still pending after {polls} polls")]
    PollLimitExceeded { operation: String, polls: u32 },

    #[error("History write failed: {0}")]
    History(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AtelierError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a provider-reported error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Api { .. }
            | Self::Network(_)
            | Self::Serialization(_)
            | Self::Authentication(_)
            | Self::RateLimited { .. }
            | Self::Provider { .. }
            | Self::PollLimitExceeded { .. } => ErrorCategory::ProviderCall,
            Self::MissingResult { .. } => ErrorCategory::MissingResult,
            Self::History(_) => ErrorCategory::HistoryWrite,
            Self::Configuration(_) | Self::Toml(_) => ErrorCategory::Configuration,
            // Recorders wrap their own I/O as History; what reaches here is a caller-supplied path
            Self::InvalidArgument(_) | Self::Io(_) => ErrorCategory::InvalidInput,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AtelierError>;
