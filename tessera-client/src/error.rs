//! The closed error taxonomy for API calls.
//!
//! Every failure a caller can observe from the data-access layer is one
//! of the six [`ApiError`] kinds. Classification picks the most specific
//! applicable kind; see [`crate::classify`] for the precedence rules.

use std::time::Duration;
use tessera_core::CodecError;
use thiserror::Error;

/// Error type for all API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The path/query could not form a valid request. Fails before any
    /// network activity.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying connection failed: DNS, TLS, timeout, reset.
    #[error("Transport failure: {message}")]
    Transport {
        /// Human-readable cause.
        message: String,
        /// Underlying error, when one exists (timeouts raised by the
        /// total-resource bound have none).
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A response arrived but had no usable structure: a failing status
    /// whose body matches neither the expected type nor the error
    /// envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server described a structured failure, regardless of HTTP
    /// status class.
    ///
    /// `code` is meant for localized-message lookup by the caller;
    /// `message` is the verbatim fallback and is never empty.
    #[error("Server error {code}: {message}")]
    Server {
        /// Machine-readable error code.
        code: String,
        /// Human-readable fallback text.
        message: String,
    },

    /// The status indicated success but the body did not match the
    /// expected typed shape. Names the offending location.
    #[error("Decode failure: {0}")]
    Decode(#[source] CodecError),

    /// The outgoing typed request body could not be serialized. Only
    /// occurs on programmer error.
    #[error("Encode failure: {0}")]
    Encode(#[source] CodecError),
}

impl ApiError {
    /// Wraps a transport-level failure.
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// A total-resource timeout, classified as transport failure.
    pub fn timeout(after: Duration) -> Self {
        Self::Transport {
            message: format!("request exceeded resource timeout of {}s", after.as_secs()),
            source: None,
        }
    }

    /// Builds a server error, substituting the code for an empty message
    /// so the verbatim fallback shown to users is never blank.
    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.clone()
        } else {
            message
        };
        Self::Server { code, message }
    }

    /// Returns the server error code, when this is a server error.
    pub fn server_code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns true for connection-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_falls_back_to_code() {
        let err = ApiError::server("SESSION_EXPIRED", "   ");
        match err {
            ApiError::Server { code, message } => {
                assert_eq!(code, "SESSION_EXPIRED");
                assert_eq!(message, "SESSION_EXPIRED");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_server_message_kept_when_present() {
        let err = ApiError::server("INVALID_SLUG", "slug is taken");
        assert_eq!(
            err.to_string(),
            "Server error INVALID_SLUG: slug is taken"
        );
    }
}
