//! Caller-facing issuance request shape.
//!
//! The three provider-required fields deserialize as raw JSON values rather
//! than typed fields. This lets the translator report every violated
//! constraint in one pass instead of rejecting the whole body at the first
//! type mismatch.

use serde::Deserialize;

/// A gift-card issuance request as submitted by an internal caller.
///
/// Field names are camelCase on the wire; `brandIdentifier` also accepts the
/// shorter `brand` alias. The request is immutable once received: the
/// translator reads it and produces a fresh
/// [`ProviderRequest`](crate::ProviderRequest) without mutating the original.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceRequest {
    /// Face value of the card. Must be a strictly positive JSON number.
    #[serde(default)]
    pub amount: Option<serde_json::Value>,

    /// One brand code, or an ordered list of candidate brand codes.
    /// Only the first candidate participates in signing.
    #[serde(default, alias = "brand")]
    pub brand_identifier: Option<serde_json::Value>,

    /// Caller-chosen idempotency token, passed through to the provider
    /// opaquely. Not verified or deduplicated locally.
    #[serde(default)]
    pub client_request_id: Option<serde_json::Value>,

    /// How the issued card is delivered. Defaults to `"url"`.
    #[serde(default)]
    pub delivery_method: Option<String>,

    /// Which side fulfils the order. Defaults to `"partner"`.
    #[serde(default)]
    pub fulfilment_by: Option<String>,

    /// Provider sector code. Defaults to `"marketplace"`.
    #[serde(default)]
    pub sector: Option<String>,

    /// ISO currency code. Defaults to `"USD"`.
    #[serde(default)]
    pub currency: Option<String>,

    /// Recipient/address details, required for addressed fulfilment.
    /// Passed through to the provider unchanged when present.
    #[serde(default)]
    pub fulfilment_parameters: Option<serde_json::Value>,
}
