//! The structured error envelope.
//!
//! Failure paths return `{"error": {"code": "...", "message": "..."}}`.
//! The envelope can appear in the body of *any* status code: some logical
//! failures ride on 2xx responses and some error statuses carry it too.

use serde::{Deserialize, Serialize};

/// Wrapper object around the error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The structured failure.
    pub error: ErrorBody,
}

/// A structured failure the server describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code intended for localized-message lookup.
    pub code: String,
    /// Human-readable fallback text.
    pub message: String,
}

/// Response body for operations that only acknowledge success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {
    /// Always `true` on success paths.
    pub ok: bool,
}
