//! Client configuration.
//!
//! One process-wide value: where the API and facilitator live, how long a
//! request may take, and optionally which wallet signs votes.

use std::time::Duration;

use zeroize::Zeroizing;

use crate::error::{ApiError, ApiResult};

/// Public governance API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://futarchy402-api.vercel.app";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable naming the governance API base URL.
pub const ENV_API_URL: &str = "FUTARCHY_API_URL";

/// Environment variable naming the facilitator base URL.
pub const ENV_FACILITATOR_URL: &str = "FUTARCHY_FACILITATOR_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "FUTARCHY_TIMEOUT_SECS";

/// Environment variable holding the base58 wallet keypair.
pub const ENV_WALLET_PRIVATE_KEY: &str = "WALLET_PRIVATE_KEY";

/// Configuration shared by every request the client makes.
#[derive(Clone)]
pub struct ClientConfig {
    api_base_url: String,
    facilitator_url: Option<String>,
    timeout: Duration,
    wallet_private_key: Option<Zeroizing<String>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    /// Configuration for `api_base_url` with defaults for everything else.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_url(api_base_url),
            facilitator_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            wallet_private_key: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// `Config` if `FUTARCHY_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(&get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.into()));
        if let Some(url) = get(ENV_FACILITATOR_URL) {
            config = config.with_facilitator_url(&url);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config = config.with_timeout(parse_timeout(&raw)?);
        }
        if let Some(key) = get(ENV_WALLET_PRIVATE_KEY) {
            config = config.with_wallet_private_key(key);
        }
        Ok(config)
    }

    /// Use a separate facilitator instead of the API's own.
    pub fn with_facilitator_url(mut self, url: &str) -> Self {
        self.facilitator_url = Some(normalize_url(url));
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the wallet used when a vote does not pass its own key.
    pub fn with_wallet_private_key(mut self, key: impl Into<String>) -> Self {
        self.wallet_private_key = Some(Zeroizing::new(key.into()));
        self
    }

    /// Replace the API base URL.
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_url(url);
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Facilitator base URL; the API base URL unless overridden.
    pub fn facilitator_url(&self) -> &str {
        self.facilitator_url
            .as_deref()
            .unwrap_or(self.api_base_url.as_str())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured wallet key, if any.
    pub fn wallet_private_key(&self) -> Option<&str> {
        self.wallet_private_key.as_ref().map(|k| k.as_str())
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet_private_key.is_some()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("facilitator_url", &self.facilitator_url())
            .field("timeout", &self.timeout)
            .field(
                "wallet_private_key",
                &self.wallet_private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(raw: &str) -> ApiResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ApiError::Config(format!(
            "{} must be a positive number of seconds, got '{}'",
            ENV_TIMEOUT_SECS, raw
        ))),
    }
}
