//! YouTube search error types

use thiserror::Error;

/// Errors that can occur while searching videos
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request rejected as malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// API key is invalid
    #[error("Invalid YouTube API key")]
    InvalidApiKey,

    /// Daily quota used up or access forbidden
    #[error("Quota exceeded or access forbidden: {0}")]
    QuotaExceeded(String),

    /// Any other HTTP failure
    #[error("YouTube API error ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}
