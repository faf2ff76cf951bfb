//! Uniform error envelope returned to callers.
//!
//! Every failure path produces the same JSON shape:
//! `{error, error_code?, details?, requestId}` with the mapped HTTP status.
//! Successful issuances bypass this module entirely; the provider body
//! passes through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use giftrail_client::NormalizedError;
use giftrail_core::ValidationError;

/// JSON error body returned to callers on every failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Stable human-readable message.
    pub error: String,
    /// Provider error code, echoed only when recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Violation list for validation failures, or raw provider/transport
    /// detail for upstream failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Locally generated opaque correlation identifier.
    #[serde(rename = "requestId")]
    pub request_id: String,
}

/// Failure outcome of one relay request, mapped to a response by
/// [`IntoResponse`].
#[derive(Debug)]
pub enum ApiError {
    /// Caller input failed validation; the provider was never called.
    Validation {
        /// The collected violations.
        error: ValidationError,
        /// Correlation id allocated for this request.
        request_id: String,
    },

    /// The request body was not parseable JSON.
    MalformedBody {
        /// Parser diagnostic for the caller.
        reason: String,
        /// Correlation id allocated for this request.
        request_id: String,
    },

    /// Provider or transport failure, already normalized.
    Provider(NormalizedError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::Provider(normalized) => StatusCode::from_u16(normalized.http_status)
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }

    fn envelope(self) -> ErrorEnvelope {
        match self {
            Self::Validation { error, request_id } => ErrorEnvelope {
                error: "Validation failed".to_string(),
                error_code: None,
                details: Some(serde_json::Value::from(error.violations)),
                request_id,
            },
            Self::MalformedBody { reason, request_id } => ErrorEnvelope {
                error: "Invalid JSON body".to_string(),
                error_code: None,
                details: Some(serde_json::Value::String(reason)),
                request_id,
            },
            Self::Provider(normalized) => ErrorEnvelope {
                error: normalized.message,
                error_code: normalized.error_code,
                details: normalized.details,
                request_id: normalized.request_id,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.envelope())).into_response()
    }
}
