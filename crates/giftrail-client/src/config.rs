//! Provider client configuration.

/// Configuration for the provider HTTP client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API (e.g. `https://partner.example.com/api/v2`).
    /// The issue endpoint lives at `{base_url}/digital/issue`.
    pub base_url: String,
    /// Relay API key issued by the provider. Sent as the `API-Key` header on
    /// every request.
    pub api_key: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Default per-request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}
