//! HTTP route handlers for the relay surface.
//!
//! - `issue` — the issuance relay endpoint (`POST /api/issue-gift-card`).
//! - `health` — process health, uptime, and memory usage (`GET /health`).

pub mod health;
pub mod issue;
