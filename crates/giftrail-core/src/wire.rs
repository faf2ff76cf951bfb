//! Provider wire shapes.
//!
//! These structs serialize to exactly the JSON the provider's issue endpoint
//! expects: snake_case keys, `choices` always a list, and the
//! `fulfilment_parameters` key omitted entirely (not null) when absent.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary face value of the card being issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceValue {
    /// Canonical amount, produced by [`canonical_amount`]. Its serialization
    /// is byte-identical to the amount segment of the signature string.
    pub amount: serde_json::Number,
    /// ISO currency code, e.g. `"USD"`.
    pub currency: String,
}

/// The translated payload sent to the provider's issue endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Caller-supplied idempotency token, passed through opaquely.
    pub client_request_id: String,
    /// Candidate brand codes in caller preference order. A scalar
    /// `brandIdentifier` arrives here as a one-element list.
    pub choices: Vec<String>,
    /// Amount and currency of the card.
    pub face_value: FaceValue,
    /// Delivery method, e.g. `"url"`.
    pub delivery_method: String,
    /// Fulfilment side, e.g. `"partner"`.
    pub fulfilment_by: String,
    /// Provider sector code, e.g. `"marketplace"`.
    pub sector: String,
    /// Recipient/address details. Present only when the caller supplied
    /// them; the key is omitted from the serialized body otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfilment_parameters: Option<serde_json::Value>,
}

impl ProviderRequest {
    /// The brand that participates in signing: the first choice.
    ///
    /// The full list still travels in the payload body; the provider
    /// contract signs only the first candidate.
    /// [`translate`](crate::translate) never produces an empty `choices`
    /// list.
    pub fn signing_brand(&self) -> &str {
        self.choices.first().map(String::as_str).unwrap_or_default()
    }

    /// The canonical amount text that participates in signing: exactly the
    /// serialization of `face_value.amount`.
    pub fn signing_amount(&self) -> String {
        self.face_value.amount.to_string()
    }
}

/// Canonicalize a decimal face value into the single JSON number used both
/// in the signature string and in the outgoing body.
///
/// Trailing fractional zeros are stripped (`10.00` → `10`, `10.50` →
/// `10.5`), and whole values serialize as integers. Returns `None` for
/// values that cannot be represented as a JSON number.
pub fn canonical_amount(amount: Decimal) -> Option<serde_json::Number> {
    let normalized = amount.normalize();
    if normalized.is_integer() {
        if let Some(whole) = normalized.to_i64() {
            return Some(serde_json::Number::from(whole));
        }
    }
    serde_json::Number::from_f64(normalized.to_f64()?)
}
