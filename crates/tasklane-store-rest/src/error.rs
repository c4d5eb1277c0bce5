//! Error types for remote store operations.

use thiserror::Error;

/// Errors that can occur while talking to the remote task table.
#[derive(Error, Debug)]
pub enum RestStoreError {
    /// Store configuration is unusable.
    #[error("Invalid store configuration: {0}")]
    Config(String),

    /// Transport or decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Remote store returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a JSON error document.
        body: String,
    },

    /// Failed to decode a response body.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

