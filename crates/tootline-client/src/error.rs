//! Error types for timeline operations.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`TimelineSource`](crate::TimelineSource).
///
/// The buffer never retries; callers decide whether to re-issue the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The access token was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a non-success status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded into statuses.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Errors surfaced by [`Timeline`](crate::Timeline) operations.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors loading a [`TimelineConfig`](crate::TimelineConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
