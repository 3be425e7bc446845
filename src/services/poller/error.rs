use std::time::Duration;

/// Why a poll did not produce a healthy result.
///
/// The `Display` text is what ends up in `PollResult::error`.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Failed to create request: invalid method {0:?}")]
    InvalidMethod(String),

    #[error("Failed to create request: invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create request: invalid header {0:?}")]
    InvalidHeader(String),

    #[error("Failed to create request: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request failed: timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to read response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("API returned status code: {0}")]
    UpstreamStatus(u16),
}
