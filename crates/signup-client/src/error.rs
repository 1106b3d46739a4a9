//! Error types for the registration client.

use thiserror::Error;

/// Errors raised while talking to the registration endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or its body could not be read.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request or response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
