//! # giftrail-core — Domain Types and Request Translation
//!
//! The caller-facing [`IssuanceRequest`], the provider wire shape
//! [`ProviderRequest`], and the validating [`translate`] step between them.
//!
//! Validation is exhaustive: every violated constraint is collected into a
//! single [`ValidationError`] so a caller can fix a request in one round
//! trip. Requests that fail validation never reach the signer or the
//! provider client.

pub mod error;
pub mod request;
pub mod translate;
pub mod wire;

pub use error::ValidationError;
pub use request::IssuanceRequest;
pub use translate::{
    translate, DEFAULT_CURRENCY, DEFAULT_DELIVERY_METHOD, DEFAULT_FULFILMENT_BY, DEFAULT_SECTOR,
};
pub use wire::{canonical_amount, FaceValue, ProviderRequest};
