//! Wire codec: JSON bytes <-> typed values.
//!
//! All Tessera endpoints speak JSON with snake_case field names, which is
//! also the in-memory field convention, so key mapping is declarative and
//! lossless: structs derive serde and enums carry an explicit
//! `rename_all = "snake_case"`.
//!
//! Timestamps are the one place the wire needs normalization. The server
//! emits ISO-8601 UTC instants and is permitted to vary sub-second
//! precision, so decoding tries the fractional-seconds format first and
//! falls back to whole seconds. See [`wire_instant`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Timestamp format with required fractional seconds.
const FORMAT_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S.%fZ";

/// Timestamp format without fractional seconds.
const FORMAT_WHOLE: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// Codec Error
// ============================================================================

/// Error type for wire encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A typed value could not be serialized to JSON.
    ///
    /// This indicates a programmer error in the request model, not bad
    /// server data.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response bytes did not match the expected typed shape.
    ///
    /// The underlying serde error names the missing field, the type
    /// mismatch, or the corrupted location (line/column).
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A timestamp string matched neither accepted ISO-8601 format.
    #[error("Unrecognized timestamp {0:?}, expected ISO-8601 UTC with or without fractional seconds")]
    Timestamp(String),
}

// ============================================================================
// Encode / Decode
// ============================================================================

/// Encodes a typed value to JSON bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the value cannot be serialized.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(CodecError::Encode)
}

/// Decodes JSON bytes into a typed value.
///
/// Decode failures are reported, never defaulted: the returned error
/// preserves serde's structural context for diagnostics.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the bytes do not match `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parses an ISO-8601 UTC instant from the wire.
///
/// Tries the fractional-seconds format first, then retries without
/// fractional seconds. The order matters: the server varies precision and
/// the fractional format must win when a fraction is present.
///
/// # Errors
///
/// Returns [`CodecError::Timestamp`] naming the offending string when both
/// formats fail.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, CodecError> {
    NaiveDateTime::parse_from_str(s, FORMAT_FRACTIONAL)
        .or_else(|_| NaiveDateTime::parse_from_str(s, FORMAT_WHOLE))
        .map(|naive| naive.and_utc())
        .map_err(|_| CodecError::Timestamp(s.to_string()))
}

/// Formats an instant for the wire, always with millisecond precision.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Serde adapter for required wire timestamps.
///
/// Use as `#[serde(with = "tessera_core::codec::wire_instant")]`.
pub mod wire_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an instant in the wire format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_instant(instant))
    }

    /// Deserializes an instant with the two-step precision fallback.
    ///
    /// # Errors
    ///
    /// Fails with a descriptive error naming the offending string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional wire timestamps.
///
/// Use as `#[serde(default, with = "tessera_core::codec::wire_instant_opt")]`.
pub mod wire_instant_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional instant; `None` becomes JSON null.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        instant: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(value) => serializer.serialize_some(&super::format_instant(value)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional instant; null and absent both map to `None`.
    ///
    /// # Errors
    ///
    /// Fails with a descriptive error naming the offending string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_instant(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_with_fractional_seconds() {
        let parsed = parse_instant("2024-03-01T08:30:15.250Z").unwrap();
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 30, 15)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(250))
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_instant_without_fractional_seconds() {
        let parsed = parse_instant("2024-03-01T08:30:15Z").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 15).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_same_moment_decodes_equal_across_precision() {
        // Zero-fraction and whole-second renderings of one moment agree.
        let fractional = parse_instant("2024-03-01T08:30:15.000Z").unwrap();
        let whole = parse_instant("2024-03-01T08:30:15Z").unwrap();
        assert_eq!(fractional, whole);
    }

    #[test]
    fn test_parse_instant_rejects_non_iso_input() {
        let err = parse_instant("March 1st, 2024").unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains("March 1st, 2024"),
            "error should name the offending string: {message}"
        );
    }

    #[test]
    fn test_parse_instant_rejects_missing_zulu_suffix() {
        assert!(parse_instant("2024-03-01T08:30:15").is_err());
        assert!(parse_instant("2024-03-01T08:30:15+02:00").is_err());
    }

    #[test]
    fn test_format_instant_round_trips() {
        let instant = Utc.with_ymd_and_hms(2031, 12, 24, 23, 59, 59).unwrap();
        let rendered = format_instant(&instant);
        assert_eq!(rendered, "2031-12-24T23:59:59.000Z");
        assert_eq!(parse_instant(&rendered).unwrap(), instant);
    }

    #[test]
    fn test_decode_error_preserves_context() {
        #[derive(Debug, serde::Deserialize)]
        struct Shaped {
            #[allow(dead_code)]
            title: String,
        }

        let err = decode::<Shaped>(br#"{"wrong_field": 1}"#).unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains("title"),
            "error should name the missing field: {message}"
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Shaped {
            title: String,
            score: i64,
        }

        let value = Shaped {
            title: "hello".to_string(),
            score: -3,
        };
        let bytes = encode(&value).unwrap();
        let back: Shaped = decode(&bytes).unwrap();
        assert_eq!(back, value);
    }
}
