//! Core error types for Tessera.

use thiserror::Error;

/// Core error type for Tessera operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data in an API payload.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
