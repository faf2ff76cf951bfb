//! # giftrail-api — Issuance Relay HTTP Service
//!
//! The inbound surface of the relay. One POST endpoint accepts issuance
//! requests from internal callers and drives them through the
//! [`pipeline::IssuancePipeline`] state machine
//! (`Validating → Signing → Calling → Responding`); a health endpoint
//! reports process status.
//!
//! ## API Surface
//!
//! | Method | Path                   | Handler                            |
//! |--------|------------------------|------------------------------------|
//! | POST   | `/api/issue-gift-card` | [`routes::issue::issue_gift_card`] |
//! | GET    | `/health`              | [`routes::health::health`]         |
//!
//! ## Response envelope
//!
//! Success passes the provider body through verbatim. Every failure path
//! returns `{error, error_code?, details?, requestId}` with the mapped
//! status; see [`error::ErrorEnvelope`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/issue-gift-card", post(routes::issue::issue_gift_card))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
