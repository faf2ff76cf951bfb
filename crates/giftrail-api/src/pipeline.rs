//! The issuance orchestrator: an explicit four-stage state machine.
//!
//! `Validating → Signing → Calling → Responding`, forward-only. Any failure
//! at any stage transitions directly to `Responding` with an error outcome;
//! no stage is retried. The timestamp is captured exactly once, between
//! validation and signing, and the same value is signed over and sent in the
//! `Timestamp` header.

use std::fmt;

use giftrail_client::{normalize, NormalizedError};
use giftrail_core::{translate, IssuanceRequest, ProviderRequest, ValidationError};
use giftrail_signing::{SignatureContext, SigningTimestamp};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Stages of the issuance pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Validating and translating the caller request.
    Validating,
    /// Building the signature context and computing the digest.
    Signing,
    /// The single outbound provider call.
    Calling,
    /// Producing the terminal response. No transitions leave this stage.
    Responding,
}

impl PipelineStage {
    /// Whether the machine may move from `self` to `next`.
    ///
    /// Forward-only: each stage advances to its successor, and every
    /// non-terminal stage may jump straight to `Responding` on failure.
    pub fn can_transition_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Validating, Signing)
                | (Signing, Calling)
                | (Validating, Responding)
                | (Signing, Responding)
                | (Calling, Responding)
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => write!(f, "validating"),
            Self::Signing => write!(f, "signing"),
            Self::Calling => write!(f, "calling"),
            Self::Responding => write!(f, "responding"),
        }
    }
}

// ---------------------------------------------------------------------------
// Intermediate and terminal values
// ---------------------------------------------------------------------------

/// A translated request together with the signature material for one
/// attempt. `timestamp` is the value that was signed over and must be sent
/// unchanged in the `Timestamp` header.
#[derive(Debug, Clone)]
pub struct SignedIssuance {
    /// The translated provider payload.
    pub request: ProviderRequest,
    /// Lowercase-hex HMAC-SHA256 digest of the canonical string.
    pub signature: String,
    /// The timestamp captured for this attempt.
    pub timestamp: SigningTimestamp,
}

/// Terminal outcome of one issuance request.
#[derive(Debug)]
pub enum IssuanceOutcome {
    /// The provider accepted; its response body passes through verbatim.
    Issued(serde_json::Value),
    /// Validation failed; no outbound call was made.
    Invalid(ValidationError),
    /// Provider or transport failure, normalized for the caller.
    Failed(NormalizedError),
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives one issuance request through the four stages.
pub struct IssuancePipeline<'a> {
    state: &'a AppState,
    request_id: String,
    stage: PipelineStage,
}

impl<'a> IssuancePipeline<'a> {
    /// Start a pipeline for one request, in the `Validating` stage.
    pub fn new(state: &'a AppState, request_id: impl Into<String>) -> Self {
        Self {
            state,
            request_id: request_id.into(),
            stage: PipelineStage::Validating,
        }
    }

    /// The correlation id allocated for this request.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The stage the pipeline is currently in.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    fn advance(&mut self, next: PipelineStage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "illegal pipeline transition {} -> {next}",
            self.stage
        );
        tracing::debug!(
            request_id = %self.request_id,
            from = %self.stage,
            to = %next,
            "pipeline transition"
        );
        self.stage = next;
    }

    /// The `Validating` stage: validate and translate the caller request.
    pub fn validate(
        &self,
        request: &IssuanceRequest,
    ) -> Result<ProviderRequest, ValidationError> {
        translate(request)
    }

    /// The `Signing` stage: build the signature context from the translated
    /// request and compute the digest.
    ///
    /// Deterministic for a given timestamp; [`run`](Self::run) feeds it one
    /// freshly captured value per attempt. Only the first brand candidate
    /// and the canonical amount text participate, matching the provider's
    /// signing contract.
    pub fn sign(
        &self,
        request: ProviderRequest,
        timestamp: SigningTimestamp,
    ) -> SignedIssuance {
        let context = SignatureContext {
            api_key: self.state.config.api_key.clone(),
            client_request_id: request.client_request_id.clone(),
            brand: request.signing_brand().to_string(),
            amount: request.signing_amount(),
            currency: request.face_value.currency.clone(),
            timestamp: timestamp.clone(),
        };
        let signature = context.sign(self.state.config.signing_secret.as_str());
        SignedIssuance {
            request,
            signature,
            timestamp,
        }
    }

    /// Drive one request through all four stages to a terminal outcome.
    pub async fn run(mut self, request: IssuanceRequest) -> IssuanceOutcome {
        let provider_request = match self.validate(&request) {
            Ok(translated) => translated,
            Err(validation) => {
                self.advance(PipelineStage::Responding);
                tracing::warn!(
                    request_id = %self.request_id,
                    violations = validation.violations.len(),
                    "request validation failed"
                );
                return IssuanceOutcome::Invalid(validation);
            }
        };

        self.advance(PipelineStage::Signing);
        let signed = self.sign(provider_request, SigningTimestamp::now());

        self.advance(PipelineStage::Calling);
        tracing::info!(
            request_id = %self.request_id,
            client_request_id = %signed.request.client_request_id,
            brand = %signed.request.signing_brand(),
            "forwarding issuance to provider"
        );

        let result = self
            .state
            .provider
            .issue(&signed.signature, &signed.timestamp, &signed.request)
            .await;

        self.advance(PipelineStage::Responding);
        match result {
            Ok(body) => {
                tracing::info!(
                    request_id = %self.request_id,
                    client_request_id = %signed.request.client_request_id,
                    "issuance succeeded"
                );
                IssuanceOutcome::Issued(body)
            }
            Err(error) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    error = %error,
                    "issuance failed"
                );
                IssuanceOutcome::Failed(normalize(&error, &self.request_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use serde_json::json;
    use zeroize::Zeroizing;

    fn test_state() -> AppState {
        AppState::new(AppConfig {
            port: 3000,
            provider_base_url: "http://127.0.0.1:1".to_string(),
            api_key: "K".to_string(),
            signing_secret: Zeroizing::new("S".to_string()),
            provider_timeout_secs: 1,
        })
        .expect("state builds")
    }

    fn reference_request() -> IssuanceRequest {
        serde_json::from_value(json!({
            "amount": 10.00,
            "brandIdentifier": ["brand-x"],
            "clientRequestId": "req-1",
            "currency": "USD"
        }))
        .expect("request deserializes")
    }

    // -- Transition relation -------------------------------------------------

    #[test]
    fn forward_transitions_are_allowed() {
        use PipelineStage::*;
        assert!(Validating.can_transition_to(Signing));
        assert!(Signing.can_transition_to(Calling));
        assert!(Calling.can_transition_to(Responding));
    }

    #[test]
    fn every_stage_can_fail_to_responding() {
        use PipelineStage::*;
        assert!(Validating.can_transition_to(Responding));
        assert!(Signing.can_transition_to(Responding));
        assert!(Calling.can_transition_to(Responding));
    }

    #[test]
    fn backward_and_skipping_transitions_are_forbidden() {
        use PipelineStage::*;
        assert!(!Responding.can_transition_to(Validating));
        assert!(!Responding.can_transition_to(Calling));
        assert!(!Calling.can_transition_to(Signing));
        assert!(!Signing.can_transition_to(Validating));
        assert!(!Validating.can_transition_to(Calling));
        assert!(!Validating.can_transition_to(Validating));
    }

    // -- Validating stage ----------------------------------------------------

    #[test]
    fn validate_stage_translates_valid_requests() {
        let state = test_state();
        let pipeline = IssuancePipeline::new(&state, "corr-1");
        assert_eq!(pipeline.stage(), PipelineStage::Validating);

        let translated = pipeline.validate(&reference_request()).unwrap();
        assert_eq!(translated.client_request_id, "req-1");
        assert_eq!(translated.choices, vec!["brand-x"]);
    }

    #[test]
    fn validate_stage_reports_violations() {
        let state = test_state();
        let pipeline = IssuancePipeline::new(&state, "corr-2");
        let request: IssuanceRequest = serde_json::from_value(json!({})).unwrap();

        let error = pipeline.validate(&request).unwrap_err();
        assert_eq!(error.violations.len(), 3);
    }

    // -- Signing stage -------------------------------------------------------

    #[test]
    fn sign_stage_is_deterministic_for_a_fixed_timestamp() {
        let state = test_state();
        let pipeline = IssuancePipeline::new(&state, "corr-3");
        let translated = pipeline.validate(&reference_request()).unwrap();
        let timestamp = SigningTimestamp::from_millis_string("1700000000000");

        let first = pipeline.sign(translated.clone(), timestamp.clone());
        let second = pipeline.sign(translated, timestamp);
        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn sign_stage_produces_the_reference_digest() {
        // Fixture from the provider contract: api_key "K", secret "S",
        // canonical string
        // "K-POST-digital-issue-req-1-brand-x-10-USD-1700000000000".
        let state = test_state();
        let pipeline = IssuancePipeline::new(&state, "corr-4");
        let translated = pipeline.validate(&reference_request()).unwrap();

        let signed = pipeline.sign(
            translated,
            SigningTimestamp::from_millis_string("1700000000000"),
        );
        assert_eq!(
            signed.signature,
            "3fba8c705eb9ae51fb7ad0877cf719485290fbc433cdd1b08d04280c80546952"
        );
        assert_eq!(signed.timestamp.as_str(), "1700000000000");
    }

    #[test]
    fn sign_stage_signs_only_the_first_brand_candidate() {
        let state = test_state();
        let pipeline = IssuancePipeline::new(&state, "corr-5");
        let timestamp = SigningTimestamp::from_millis_string("1700000000000");

        let single: IssuanceRequest = serde_json::from_value(json!({
            "amount": 10,
            "brandIdentifier": "brand-x",
            "clientRequestId": "req-1"
        }))
        .unwrap();
        let multi: IssuanceRequest = serde_json::from_value(json!({
            "amount": 10,
            "brandIdentifier": ["brand-x", "brand-y"],
            "clientRequestId": "req-1"
        }))
        .unwrap();

        let single_signed = pipeline.sign(
            pipeline.validate(&single).unwrap(),
            timestamp.clone(),
        );
        let multi_signed = pipeline.sign(pipeline.validate(&multi).unwrap(), timestamp);

        // Same signature: only the first candidate participates. The payload
        // still differs in its choices list.
        assert_eq!(single_signed.signature, multi_signed.signature);
        assert_eq!(multi_signed.request.choices, vec!["brand-x", "brand-y"]);
    }

    // -- Full run ------------------------------------------------------------

    #[tokio::test]
    async fn run_returns_invalid_without_calling_the_provider() {
        // The configured provider is a closed port; reaching it would fail
        // loudly. A validation failure must terminate before that.
        let state = test_state();
        let request: IssuanceRequest = serde_json::from_value(json!({})).unwrap();

        let outcome = IssuancePipeline::new(&state, "corr-6").run(request).await;
        match outcome {
            IssuanceOutcome::Invalid(validation) => {
                assert!(validation
                    .violations
                    .contains(&"amount is required".to_string()));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_normalizes_transport_failure() {
        let state = test_state();
        let outcome = IssuancePipeline::new(&state, "corr-7")
            .run(reference_request())
            .await;

        match outcome {
            IssuanceOutcome::Failed(normalized) => {
                assert_eq!(normalized.http_status, 502);
                assert_eq!(normalized.request_id, "corr-7");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
