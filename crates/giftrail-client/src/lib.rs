//! # giftrail-client — Provider HTTP Client and Error Normalization
//!
//! The outbound half of the relay: a typed `reqwest` client that submits one
//! signed issuance request per caller invocation, and the normalizer that
//! maps provider failures into the relay's stable error taxonomy.
//!
//! ## Architecture
//!
//! [`ProviderClient`] wraps a `reqwest::Client` configured once with the
//! provider base URL, the `API-Key` default header, and the per-request
//! timeout. It is `Send + Sync` and designed to be shared via `Arc` across
//! async tasks.
//!
//! ## Error Handling
//!
//! There are no retries: the provider call is a single attempt, and every
//! failure mode (timeout, transport error, non-2xx response) surfaces as a
//! typed [`ProviderError`] carrying whatever status and body the transport
//! produced. [`normalize`] turns those values into the uniform envelope the
//! relay returns to its callers.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;

pub use client::ProviderClient;
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use normalize::{known_error_message, normalize, NormalizedError, GENERIC_FAILURE_MESSAGE};
