//! # giftrail-signing — Canonical String Construction and HMAC Signing
//!
//! Builds the provider's canonical signature string from the ordered request
//! fields and computes the keyed digest that authenticates an issuance call.
//!
//! ## Canonical string
//!
//! ```text
//! {api_key}-POST-digital-issue-{client_request_id}-{brand}-{amount}-{currency}-{timestamp}
//! ```
//!
//! Field order, the hyphen separators, and the literal `POST-digital-issue`
//! segment are fixed by the provider contract. Any deviation (reordering,
//! reformatting, or an amount serialized differently here than in the
//! request body) invalidates the signature.
//!
//! ## Security Invariant
//!
//! The shared secret is an input to [`SignatureContext::sign`] only. It is
//! never stored here and never appears in any `Debug` or log output; the
//! context itself is safe to log.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// The literal method/endpoint segment of the canonical string.
const SIGNED_OPERATION: &str = "POST-digital-issue";

// ---------------------------------------------------------------------------
// Signing timestamp
// ---------------------------------------------------------------------------

/// A millisecond-epoch timestamp captured once per issuance attempt.
///
/// The same value must be used for the signature computation and the
/// outgoing `Timestamp` header; the provider rejects the call when the two
/// disagree. Holding the stringified form in a dedicated type keeps that
/// reuse visible at the seams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningTimestamp(String);

impl SigningTimestamp {
    /// Capture the current time as a millisecond-epoch string.
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis().to_string())
    }

    /// Build a timestamp from an already-stringified millisecond epoch.
    /// Intended for tests and replay of recorded attempts.
    pub fn from_millis_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The stringified millisecond epoch.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SigningTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Signature context
// ---------------------------------------------------------------------------

/// The ordered fields that participate in request signing.
///
/// `brand` is the first candidate brand only; when the caller supplied a
/// list, the remaining candidates travel in the payload body but do not
/// participate in the signature. `amount` is the canonical amount text,
/// byte-identical to the serialized `face_value.amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureContext {
    /// Relay API key issued by the provider.
    pub api_key: String,
    /// Caller-supplied idempotency token.
    pub client_request_id: String,
    /// First candidate brand code.
    pub brand: String,
    /// Canonical amount text.
    pub amount: String,
    /// ISO currency code.
    pub currency: String,
    /// Millisecond-epoch timestamp for this attempt.
    pub timestamp: SigningTimestamp,
}

impl SignatureContext {
    /// Assemble the canonical signature string in the provider-mandated
    /// field order.
    pub fn canonical_string(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}-{}-{}",
            self.api_key,
            SIGNED_OPERATION,
            self.client_request_id,
            self.brand,
            self.amount,
            self.currency,
            self.timestamp,
        )
    }

    /// Compute the lowercase-hex HMAC-SHA256 digest of the canonical string
    /// under the shared secret.
    ///
    /// Pure and deterministic: identical inputs always produce an identical
    /// digest, and no I/O happens here.
    pub fn sign(&self, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(self.canonical_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
