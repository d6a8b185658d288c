//! Application constants and environment-driven configuration.

use std::net::SocketAddr;

use thiserror::Error;

pub const APP_NAME: &str = "BioInsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Root of the OpenRouter-compatible chat-completions API.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

/// Attribution header OpenRouter asks apps to send with every request.
pub const OPENROUTER_REFERER: &str = "https://bioinsight.app";

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default `RUST_LOG` filter when the environment does not set one.
pub fn default_log_filter() -> &'static str {
    "bioinsight=info,tower_http=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddr(String),

    #[error("Invalid timeout '{0}' (expected seconds)")]
    InvalidTimeout(String),
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `OPENROUTER_API_KEY` is required; `OPENROUTER_BASE_URL`,
    /// `BIOINSIGHT_BIND` and `BIOINSIGHT_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = get("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url =
            get("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_URL.to_string());

        let bind_raw = get("BIOINSIGHT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let request_timeout_secs = match get("BIOINSIGHT_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            bind_addr,
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_applied_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk-or-test")]))
            .expect("config should load");
        assert_eq!(config.api_key, "sk-or-test");
        assert_eq!(config.base_url, DEFAULT_OPENROUTER_URL);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn blank_api_key_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn overrides_respected() {
        let config = AppConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-or-test"),
            ("OPENROUTER_BASE_URL", "http://127.0.0.1:9999/v1"),
            ("BIOINSIGHT_BIND", "127.0.0.1:8088"),
            ("BIOINSIGHT_TIMEOUT_SECS", "30"),
        ]))
        .expect("config should load");
        assert_eq!(config.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8088");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn bad_bind_address_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-or-test"),
            ("BIOINSIGHT_BIND", "not-an-addr"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr(_))));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-or-test"),
            ("BIOINSIGHT_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
