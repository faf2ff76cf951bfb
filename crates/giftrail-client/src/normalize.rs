//! Normalization of provider failures into the relay's error taxonomy.
//!
//! Recognized provider error codes map to a fixed catalog of stable
//! human-readable messages; everything else collapses to a generic failure
//! carrying the raw provider detail (or the transport error description when
//! there was no provider response at all).

use serde_json::Value;

use crate::error::ProviderError;

/// Message used when the provider failure carries no recognized error code.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process gift card request";

/// Status surfaced when there is no provider response at all.
const TRANSPORT_FAILURE_STATUS: u16 = 502;

/// Fixed mapping from recognized provider error codes to stable messages.
const PROVIDER_ERROR_CODES: [(&str, &str); 5] = [
    ("INVALID_SIGNATURE", "The provided signature is invalid"),
    ("INVALID_TIMESTAMP", "The timestamp is invalid or expired"),
    ("INSUFFICIENT_FUNDS", "Insufficient funds for this transaction"),
    ("BRAND_NOT_AVAILABLE", "The requested brand is not available"),
    ("INVALID_FACE_VALUE", "The face value is invalid for this brand"),
];

/// Stable message for a recognized provider error code.
pub fn known_error_message(code: &str) -> Option<&'static str> {
    PROVIDER_ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// A provider failure normalized into the relay's stable taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedError {
    /// HTTP status to surface to the caller.
    pub http_status: u16,
    /// Stable human-readable message.
    pub message: String,
    /// The provider's error code, echoed only when recognized.
    pub error_code: Option<String>,
    /// Raw provider detail (or transport error description) for failures
    /// outside the recognized catalog.
    pub details: Option<Value>,
    /// Locally generated opaque identifier for correlation, independent of
    /// the caller's `clientRequestId`.
    pub request_id: String,
}

/// Classify a provider failure.
///
/// - A response carrying a recognized `error_code` keeps the provider's
///   HTTP status and gets the catalog message plus the original code.
/// - A response with an unrecognized shape keeps the provider's status and
///   echoes the raw body under `details`.
/// - A transport-level failure (timeout, DNS, reset) surfaces as 502 with
///   the transport error description under `details`.
pub fn normalize(error: &ProviderError, request_id: &str) -> NormalizedError {
    match error {
        ProviderError::Rejected { status, detail } => {
            let recognized = detail
                .get("error_code")
                .and_then(Value::as_str)
                .and_then(|code| {
                    known_error_message(code).map(|message| (code.to_string(), message))
                });

            match recognized {
                Some((code, message)) => NormalizedError {
                    http_status: *status,
                    message: message.to_string(),
                    error_code: Some(code),
                    details: None,
                    request_id: request_id.to_string(),
                },
                None => NormalizedError {
                    http_status: *status,
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                    error_code: None,
                    details: Some(detail.clone()),
                    request_id: request_id.to_string(),
                },
            }
        }
        other => NormalizedError {
            http_status: TRANSPORT_FAILURE_STATUS,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            error_code: None,
            details: Some(Value::String(other.to_string())),
            request_id: request_id.to_string(),
        },
    }
}
