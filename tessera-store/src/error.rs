//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// System keychain was unavailable or denied access.
    #[error("Keychain error: {0}")]
    Keychain(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}
