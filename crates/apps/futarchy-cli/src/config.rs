//! CLI configuration.
//!
//! Layers, lowest to highest: environment, `config.toml`, command-line
//! flags.

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futarchy_client::ClientConfig;

use crate::error::{CliError, CliResult};

const ENV_VAR_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Expand `${VAR_NAME}` references through `lookup`.
///
/// Unknown variables are left as written.
fn expand_vars<F>(input: &str, lookup: &F) -> CliResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(ENV_VAR_PATTERN).map_err(|e| CliError::config(e.to_string()))?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .to_string())
}

fn expand_opt<F>(value: &mut Option<String>, lookup: &F) -> CliResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = value.as_mut() {
        *v = expand_vars(v, lookup)?;
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// API endpoints and timeout.
    pub api: ApiSection,
    /// Signing wallet.
    pub wallet: WalletSection,
}

/// `[api]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Governance API base URL.
    pub url: Option<String>,
    /// Facilitator base URL (defaults to the API URL).
    pub facilitator_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[wallet]` section.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletSection {
    /// Base58 wallet keypair, usually `${WALLET_PRIVATE_KEY}`.
    pub private_key: Option<String>,
}

impl std::fmt::Debug for WalletSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSection")
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from a file, expanding `${VAR}` from the
    /// environment. A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Load configuration, expanding `${VAR}` through `lookup`.
    pub fn load_with<F>(path: &Path, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        expand_opt(&mut config.api.url, &lookup)?;
        expand_opt(&mut config.api.facilitator_url, &lookup)?;
        expand_opt(&mut config.wallet.private_key, &lookup)?;

        Ok(config)
    }

    /// Load configuration from the default location.
    pub fn load_default() -> CliResult<Self> {
        Self::load(&default_config_path())
    }

    /// Client configuration from the environment, this file, and the
    /// `--api-url` flag.
    pub fn client_config(&self, api_url: Option<&str>) -> CliResult<ClientConfig> {
        self.apply(ClientConfig::from_env()?, api_url)
    }

    /// Layer this file and the `--api-url` flag over `base`.
    pub fn apply(&self, base: ClientConfig, api_url: Option<&str>) -> CliResult<ClientConfig> {
        let mut config = base;

        if let Some(url) = non_blank(&self.api.url) {
            config = config.with_api_base_url(url);
        }
        if let Some(url) = non_blank(&self.api.facilitator_url) {
            config = config.with_facilitator_url(url);
        }
        match self.api.timeout_secs {
            Some(0) => return Err(CliError::config("api.timeout_secs must be positive")),
            Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
            None => {}
        }
        if let Some(key) = non_blank(&self.wallet.private_key) {
            config = config.with_wallet_private_key(key);
        }

        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config = config.with_api_base_url(url);
        }
        Ok(config)
    }
}

/// Directory holding the CLI configuration (`~/.futarchy`).
pub fn default_base_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".futarchy"))
        .unwrap_or_else(|| PathBuf::from(".futarchy"))
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futarchy_test_utils::temp_config_file;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "TEST_API" => Some("https://api.from-env.example.com".into()),
            "TEST_KEY" => Some("secret-key".into()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_vars() {
        assert_eq!(
            expand_vars("${TEST_API}", &lookup).unwrap(),
            "https://api.from-env.example.com"
        );
        assert_eq!(
            expand_vars("${NONEXISTENT_VAR_12345}", &lookup).unwrap(),
            "${NONEXISTENT_VAR_12345}"
        );
        assert_eq!(
            expand_vars("prefix_${TEST_KEY}_suffix", &lookup).unwrap(),
            "prefix_secret-key_suffix"
        );
        assert_eq!(expand_vars("$TEST_KEY", &lookup).unwrap(), "$TEST_KEY");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let path = Path::new("/tmp/futarchy_nonexistent_12345/config.toml");
        let config = CliConfig::load_with(path, lookup).unwrap();
        assert!(config.api.url.is_none());
        assert!(config.wallet.private_key.is_none());
    }

    #[test]
    fn test_load_expands_variables() {
        let (_dir, path) = temp_config_file(
            r#"
[api]
url = "${TEST_API}"
timeout_secs = 5

[wallet]
private_key = "${TEST_KEY}"
"#,
        );
        let config = CliConfig::load_with(&path, lookup).unwrap();
        assert_eq!(
            config.api.url.as_deref(),
            Some("https://api.from-env.example.com")
        );
        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.wallet.private_key.as_deref(), Some("secret-key"));
        assert!(!format!("{:?}", config).contains("secret-key"));
    }

    #[test]
    fn test_invalid_toml() {
        let (_dir, path) = temp_config_file("[api\nurl = 1");
        let err = CliConfig::load_with(&path, lookup).unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_precedence_flag_over_file_over_env() {
        let env = ClientConfig::new("https://env.example.com")
            .with_wallet_private_key("env-key")
            .with_facilitator_url("https://fac-env.example.com");
        let config = CliConfig {
            api: ApiSection {
                url: Some("https://file.example.com".into()),
                facilitator_url: None,
                timeout_secs: Some(7),
            },
            wallet: WalletSection::default(),
        };

        let resolved = config.apply(env.clone(), None).unwrap();
        assert_eq!(resolved.api_base_url(), "https://file.example.com");
        assert_eq!(resolved.facilitator_url(), "https://fac-env.example.com");
        assert_eq!(resolved.timeout(), Duration::from_secs(7));
        assert_eq!(resolved.wallet_private_key(), Some("env-key"));

        let flagged = config
            .apply(env, Some("https://flag.example.com/"))
            .unwrap();
        assert_eq!(flagged.api_base_url(), "https://flag.example.com");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CliConfig {
            api: ApiSection {
                timeout_secs: Some(0),
                ..ApiSection::default()
            },
            ..CliConfig::default()
        };
        let err = config.apply(ClientConfig::default(), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with(".futarchy/config.toml"));
    }
}
