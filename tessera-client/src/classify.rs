//! Response classification.
//!
//! Pure functions mapping `(status, body)` to a typed value or exactly
//! one [`ApiError`] kind, so the taxonomy is testable without a network.
//!
//! The precedence rule is "most specific wins": a parseable error
//! envelope is always [`ApiError::Server`], whatever the status class.
//! The read and write paths differ deliberately:
//!
//! - **Reads** (GET) short-circuit on a failing status: the success type
//!   is never attempted against a non-2xx body.
//! - **Writes** (POST/PUT/DELETE) try the success type against the raw
//!   body FIRST, before branching on status, because success-shaped
//!   payloads can ride on non-2xx statuses and vice versa. Only when
//!   that fails does status interpretation take over.

use serde::de::DeserializeOwned;
use tessera_core::{codec, ErrorEnvelope};

use crate::error::ApiError;

/// Interprets a read (GET) response.
///
/// # Errors
///
/// - failing status + parseable envelope: [`ApiError::Server`]
/// - failing status otherwise: [`ApiError::MalformedResponse`]
/// - success status + envelope body: [`ApiError::Server`] (logical
///   failure on a 2xx path)
/// - success status + unparseable body: [`ApiError::Decode`]
pub fn classify_read<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(error_from_failing_status(status, body));
    }

    match codec::decode::<T>(body) {
        Ok(value) => Ok(value),
        Err(decode_err) => Err(match decode_envelope(body) {
            Some(server_err) => server_err,
            None => ApiError::Decode(decode_err),
        }),
    }
}

/// Interprets a write (POST/PUT/DELETE) response.
///
/// The success type is attempted against the raw body before any status
/// branching; see the module docs for why.
///
/// # Errors
///
/// Falls back to the same classification as [`classify_read`] when the
/// body is not success-shaped.
pub fn classify_write<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    let decode_err = match codec::decode::<T>(body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if !status.is_success() {
        return Err(error_from_failing_status(status, body));
    }

    // Success status, body not success-shaped: a 2xx logical failure if
    // the envelope parses, a decode failure otherwise.
    match decode_envelope(body) {
        Some(server_err) => Err(server_err),
        None => Err(ApiError::Decode(decode_err)),
    }
}

/// Classifies a non-2xx response: a parseable envelope beats the status,
/// anything else is a malformed response.
fn error_from_failing_status(status: reqwest::StatusCode, body: &[u8]) -> ApiError {
    match decode_envelope(body) {
        Some(server_err) => server_err,
        None => ApiError::MalformedResponse(format!(
            "status {status} with no parseable error envelope"
        )),
    }
}

/// Attempts to read the standard `{"error": {code, message}}` shape.
fn decode_envelope(body: &[u8]) -> Option<ApiError> {
    codec::decode::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| ApiError::server(envelope.error.code, envelope.error.message))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Widget {
        name: String,
    }

    const WIDGET: &[u8] = br#"{"name": "gear"}"#;
    const ENVELOPE: &[u8] = br#"{"error": {"code": "INVALID_SLUG", "message": "slug is taken"}}"#;

    #[test]
    fn test_read_success() {
        let widget: Widget = classify_read(StatusCode::OK, WIDGET).unwrap();
        assert_eq!(widget.name, "gear");
    }

    #[test]
    fn test_read_422_with_envelope_is_server_error() {
        // A failing status with a parseable envelope is always Server,
        // never MalformedResponse.
        let err = classify_read::<Widget>(StatusCode::UNPROCESSABLE_ENTITY, ENVELOPE).unwrap_err();
        match err {
            ApiError::Server { code, message } => {
                assert_eq!(code, "INVALID_SLUG");
                assert_eq!(message, "slug is taken");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn test_read_200_with_wrong_shape_is_decode_failure() {
        let err = classify_read::<Widget>(StatusCode::OK, br#"{"title": 3}"#).unwrap_err();
        match err {
            ApiError::Decode(inner) => {
                assert!(inner.to_string().contains("name"), "{inner}");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_read_200_with_envelope_is_server_error() {
        // Logical failures can ride on 2xx paths.
        let err = classify_read::<Widget>(StatusCode::OK, ENVELOPE).unwrap_err();
        assert_eq!(err.server_code(), Some("INVALID_SLUG"));
    }

    #[test]
    fn test_read_failing_status_with_junk_body_is_malformed() {
        let err = classify_read::<Widget>(StatusCode::BAD_GATEWAY, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_read_failing_status_never_tries_success_type() {
        // The body happens to match the success type, but GET semantics
        // short-circuit on the failing status.
        let err = classify_read::<Widget>(StatusCode::INTERNAL_SERVER_ERROR, WIDGET).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_write_decodes_success_shape_despite_failing_status() {
        // Write semantics: decode is attempted before status branching.
        let widget: Widget = classify_write(StatusCode::NOT_FOUND, WIDGET).unwrap();
        assert_eq!(widget.name, "gear");
    }

    #[test]
    fn test_write_envelope_on_failing_status_is_server_error() {
        let err = classify_write::<Widget>(StatusCode::CONFLICT, ENVELOPE).unwrap_err();
        assert_eq!(err.server_code(), Some("INVALID_SLUG"));
    }

    #[test]
    fn test_write_envelope_on_success_status_is_server_error() {
        let err = classify_write::<Widget>(StatusCode::OK, ENVELOPE).unwrap_err();
        assert_eq!(err.server_code(), Some("INVALID_SLUG"));
    }

    #[test]
    fn test_write_junk_on_success_status_is_decode_failure() {
        let err = classify_write::<Widget>(StatusCode::OK, b"[]").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_write_junk_on_failing_status_is_malformed() {
        let err = classify_write::<Widget>(StatusCode::BAD_GATEWAY, b"").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_server_message_falls_back_to_code() {
        let body = br#"{"error": {"code": "RATE_LIMITED", "message": ""}}"#;
        let err = classify_read::<Widget>(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        match err {
            ApiError::Server { message, .. } => assert_eq!(message, "RATE_LIMITED"),
            other => panic!("expected Server, got {other:?}"),
        }
    }
}
