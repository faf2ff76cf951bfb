//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use giftrail_client::{ProviderClient, ProviderConfig, ProviderError};

use crate::config::AppConfig;

/// Read-only state shared across requests. Cheap to clone; nothing here is
/// mutable after startup, so no synchronization is needed.
#[derive(Clone)]
pub struct AppState {
    /// Immutable process configuration.
    pub config: Arc<AppConfig>,
    /// The shared provider HTTP client.
    pub provider: Arc<ProviderClient>,
    /// Process start instant, for the health report.
    pub started_at: Instant,
}

impl AppState {
    /// Build the shared state, constructing the provider client from the
    /// configuration.
    pub fn new(config: AppConfig) -> Result<Self, ProviderError> {
        let provider = ProviderClient::new(ProviderConfig {
            base_url: config.provider_base_url.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.provider_timeout_secs,
        })?;

        Ok(Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
            started_at: Instant::now(),
        })
    }
}
