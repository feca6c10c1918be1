//! Error types for the relay core library.

use thiserror::Error;

/// Core error type for the review relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid webhook payload: {0}")]
    InvalidWebhookPayload(String),

    #[error("Diff fetch failed: {0}")]
    DiffFetch(String),

    #[error("Review generation failed: {0}")]
    Generation(String),

    #[error("Comment post failed: {0}")]
    CommentPost(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
