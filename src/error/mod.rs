//! Error types for Wayfinder.

use thiserror::Error;

/// Primary error type for all Wayfinder operations.
#[derive(Error, Debug)]
pub enum WayfinderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl WayfinderError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Render an error together with its full `source()` chain.
///
/// Used by the planner to build the diagnostic trace carried in failure
/// envelopes.
pub fn error_trace(err: &dyn std::error::Error) -> String {
    let mut out = format!("{err}");
    let mut source = err.source();
    let mut depth = 1;
    while let Some(cause) = source {
        out.push_str(&format!("\n  {depth}: caused by: {cause}"));
        source = cause.source();
        depth += 1;
    }
    out
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WayfinderError>;
