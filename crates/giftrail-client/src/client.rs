//! HTTP client for the provider's digital issue endpoint.

use std::time::Duration;

use giftrail_core::ProviderRequest;
use giftrail_signing::SigningTimestamp;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// HTTP client for the provider's issue endpoint.
///
/// Built once from [`ProviderConfig`] and shared across requests; the
/// `API-Key` and `Accept` headers are installed as client defaults, while
/// `Signature` and `Timestamp` vary per request and are set by
/// [`issue`](Self::issue).
#[derive(Debug)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
    timeout_millis: u64,
}

impl ProviderClient {
    /// Create a new provider client from configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers.insert(
                    "API-Key",
                    reqwest::header::HeaderValue::from_str(&config.api_key).map_err(|_| {
                        ProviderError::Config {
                            reason: "invalid API key characters".into(),
                        }
                    })?,
                );
                headers
            })
            .build()
            .map_err(|e| ProviderError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout_millis: config.timeout_secs.saturating_mul(1000),
        })
    }

    /// URL of the provider's issue endpoint.
    pub fn issue_url(&self) -> String {
        format!("{}/digital/issue", self.base_url)
    }

    /// Submit one signed issuance request.
    ///
    /// Exactly one outbound call per invocation: timeouts, transport
    /// failures, and non-2xx responses are all returned as typed errors
    /// without retry. The `timestamp` must be the same value that was signed
    /// over; the provider rejects the call when the two disagree.
    ///
    /// On success the provider's response body is returned verbatim as JSON.
    pub async fn issue(
        &self,
        signature: &str,
        timestamp: &SigningTimestamp,
        payload: &ProviderRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = self.issue_url();
        tracing::debug!(
            endpoint = %url,
            client_request_id = %payload.client_request_id,
            "submitting issuance to provider"
        );

        let response = self
            .client
            .post(&url)
            .header("Signature", signature)
            .header("Timestamp", timestamp.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        elapsed_ms: self.timeout_millis,
                    }
                } else {
                    ProviderError::Transport {
                        endpoint: url.clone(),
                        source: e,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Deserialization {
                endpoint: url,
                source: e,
            })
    }
}
