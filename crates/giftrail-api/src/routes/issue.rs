//! `POST /api/issue-gift-card` — the issuance relay endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use giftrail_core::IssuanceRequest;

use crate::error::ApiError;
use crate::pipeline::{IssuanceOutcome, IssuancePipeline};
use crate::state::AppState;

/// Relay one issuance request to the provider.
///
/// Allocates a fresh correlation id, drives the pipeline state machine, and
/// maps the terminal outcome to the response: the provider body verbatim on
/// success, the uniform error envelope otherwise.
pub async fn issue_gift_card(
    State(state): State<AppState>,
    body: Result<Json<IssuanceRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(request_id = %request_id, "unparseable request body");
            return ApiError::MalformedBody {
                reason: rejection.body_text(),
                request_id,
            }
            .into_response();
        }
    };

    tracing::info!(request_id = %request_id, "processing gift card issuance request");

    match IssuancePipeline::new(&state, request_id.clone())
        .run(request)
        .await
    {
        IssuanceOutcome::Issued(body) => (StatusCode::OK, Json(body)).into_response(),
        IssuanceOutcome::Invalid(validation) => ApiError::Validation {
            error: validation,
            request_id,
        }
        .into_response(),
        IssuanceOutcome::Failed(normalized) => ApiError::Provider(normalized).into_response(),
    }
}
