//! Service configuration, loaded once at startup.
//!
//! The pipeline never reads ambient environment state per request: the
//! configuration is resolved here, validated, and injected into the signer,
//! translator, and provider client as an immutable value. A missing API key
//! or signing secret is a fatal startup error, never a per-request failure.

use std::fmt;

use zeroize::Zeroizing;

use giftrail_client::ProviderConfig;

const ENV_PROVIDER_URL: &str = "GIFTRAIL_PROVIDER_URL";
const ENV_API_KEY: &str = "GIFTRAIL_API_KEY";
const ENV_API_SECRET: &str = "GIFTRAIL_API_SECRET";
const ENV_PORT: &str = "GIFTRAIL_PORT";
const ENV_PROVIDER_TIMEOUT_SECS: &str = "GIFTRAIL_PROVIDER_TIMEOUT_SECS";

/// Default listening port when `GIFTRAIL_PORT` is absent.
pub const DEFAULT_PORT: u16 = 3000;

/// Startup configuration errors. All of these are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("missing required environment variable {name}")]
    Missing {
        /// Name of the missing variable.
        name: &'static str,
    },

    /// An environment variable is present but unusable.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Immutable process-wide configuration.
///
/// The signing secret is held in [`Zeroizing`] so it is wiped from memory on
/// drop, and the `Debug` impl redacts it entirely.
#[derive(Clone)]
pub struct AppConfig {
    /// Port the relay listens on.
    pub port: u16,
    /// Base URL of the provider API.
    pub provider_base_url: String,
    /// Relay API key issued by the provider.
    pub api_key: String,
    /// Shared HMAC signing secret.
    pub signing_secret: Zeroizing<String>,
    /// Timeout for the outbound provider call, in seconds.
    pub provider_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// The seam that makes startup validation testable without mutating the
    /// process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let provider_base_url = require(&lookup, ENV_PROVIDER_URL)?;
        url::Url::parse(&provider_base_url).map_err(|e| ConfigError::Invalid {
            name: ENV_PROVIDER_URL,
            reason: e.to_string(),
        })?;

        let api_key = require(&lookup, ENV_API_KEY)?;
        let signing_secret = Zeroizing::new(require(&lookup, ENV_API_SECRET)?);

        let port = parse_optional(&lookup, ENV_PORT)?.unwrap_or(DEFAULT_PORT);
        let provider_timeout_secs = parse_optional(&lookup, ENV_PROVIDER_TIMEOUT_SECS)?
            .unwrap_or(ProviderConfig::DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            port,
            provider_base_url,
            api_key,
            signing_secret,
            provider_timeout_secs,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("provider_base_url", &self.provider_base_url)
            .field("api_key", &self.api_key)
            .field("signing_secret", &"[redacted]")
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .finish()
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing { name })
}

fn parse_optional<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(None),
    }
}
