//! Client configuration
//!
//! Resolution order: built-in defaults, then environment
//! (`STYLEVIEW_API_BASE`, `STYLEVIEW_TIMEOUT_SECS`), then CLI flags.

use std::time::Duration;

use once_cell::sync::Lazy;
use url::Url;

use crate::error::ViewerError;

/// Default backend base address
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE: &str = "STYLEVIEW_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "STYLEVIEW_TIMEOUT_SECS";

static DEFAULT_API_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"));

/// Where and how to reach the parse backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: Url,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_URL.clone(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with environment, then explicit overrides
    pub fn resolve(
        api_base: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ViewerError> {
        Self::resolve_with(api_base, timeout_secs, |key| std::env::var(key).ok())
    }

    /// [`resolve`](Self::resolve) with an injectable environment lookup
    pub fn resolve_with(
        api_base: Option<&str>,
        timeout_secs: Option<u64>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ViewerError> {
        let mut config = Self::default();

        if let Some(base) = api_base.map(str::to_string).or_else(|| env(ENV_API_BASE)) {
            config.api_base = parse_api_base(&base)?;
        }

        let timeout = match timeout_secs {
            Some(secs) => Some(secs),
            None => env(ENV_TIMEOUT_SECS)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|_| ViewerError::Config {
                        details: format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw),
                    })
                })
                .transpose()?,
        };
        if let Some(secs) = timeout {
            if secs == 0 {
                return Err(ViewerError::Config {
                    details: "timeout must be at least 1 second".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        tracing::debug!(
            api_base = %config.api_base,
            timeout_secs = config.timeout.as_secs(),
            "Resolved client config"
        );

        Ok(config)
    }

    /// Full URL of the parse endpoint
    pub fn parse_url(&self) -> Url {
        let mut url = self.api_base.clone();
        // http(s) base URLs always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("parse");
        }
        url
    }
}

fn parse_api_base(raw: &str) -> Result<Url, ViewerError> {
    let url = Url::parse(raw.trim()).map_err(|e| ViewerError::Config {
        details: format!("api base '{}': {}", raw, e),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ViewerError::Config {
            details: format!("api base '{}': unsupported scheme '{}'", raw, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve_with(None, None, env_of(&[])).unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.parse_url().as_str(), "http://localhost:8080/api/parse");
    }

    #[test]
    fn test_default_matches_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_env_then_flags() {
        let env = env_of(&[
            (ENV_API_BASE, "http://backend:9000/v1/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);
        let config = ClientConfig::resolve_with(None, None, &env).unwrap();
        assert_eq!(config.parse_url().as_str(), "http://backend:9000/v1/parse");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config =
            ClientConfig::resolve_with(Some("https://other.test"), Some(2), &env).unwrap();
        assert_eq!(config.parse_url().as_str(), "https://other.test/parse");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::resolve_with(Some("not a url"), None, env_of(&[])),
            Err(ViewerError::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::resolve_with(Some("ftp://host/api"), None, env_of(&[])),
            Err(ViewerError::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::resolve_with(None, Some(0), env_of(&[])),
            Err(ViewerError::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::resolve_with(None, None, env_of(&[(ENV_TIMEOUT_SECS, "soon")])),
            Err(ViewerError::Config { .. })
        ));
    }
}
