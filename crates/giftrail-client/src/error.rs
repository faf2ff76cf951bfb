//! Provider client error types.

/// Errors from provider API calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request to the provider timed out.
    #[error("provider request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed time in milliseconds before the timeout triggered.
        elapsed_ms: u64,
    },

    /// HTTP transport failure with no usable provider response
    /// (DNS, connection refused, reset).
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        /// The endpoint URL that was called.
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The provider returned a non-2xx status.
    #[error("provider returned HTTP {status}")]
    Rejected {
        /// HTTP status of the provider response.
        status: u16,
        /// Response body, parsed as JSON when possible and carried as a
        /// plain string otherwise.
        detail: serde_json::Value,
    },

    /// A 2xx response body could not be parsed as JSON.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The endpoint URL that was called.
        endpoint: String,
        /// The underlying deserialization error.
        source: reqwest::Error,
    },

    /// The client could not be constructed from its configuration.
    #[error("provider client configuration error: {reason}")]
    Config {
        /// Why construction failed.
        reason: String,
    },
}
