//! Client configuration
//!
//! Defaults point at the public Fiscal Data service. The binary overlays a
//! couple of optional environment variables on top via [`ClientConfig::from_env`].

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::time::Duration;

/// Public Fiscal Data API root
pub const DEFAULT_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "BESSENT_BASE_URL";

/// Environment variable overriding the request timeout, in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "BESSENT_TIMEOUT_SECS";

/// Configuration for the Treasury HTTP transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base service URL, without a trailing dataset path
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Treasury-API-Client/{}", env!("CARGO_PKG_VERSION")),
            default_headers,
        }
    }
}

impl ClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build a config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs = secs
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("{ENV_TIMEOUT_SECS} invalid int: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Treasury-API-Client/"));
        assert_eq!(
            config.default_headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("https://mirror.example")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("CustomAgent/1.0")
            .with_header("X-Trace", "abc");

        assert_eq!(config.base_url, "https://mirror.example");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "CustomAgent/1.0");
        assert_eq!(config.default_headers.get("X-Trace"), Some(&"abc".to_string()));
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://127.0.0.1:8080/"),
            (ENV_TIMEOUT_SECS, " 7 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_from_lookup_blank_is_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "   ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
