//! Process configuration loaded from the environment
//!
//! Mirrors the upstream provider's conventions: `CMC_API_KEY` is required
//! and its absence halts startup; cache tuning variables are optional.

use crate::error::{Error, Result};

/// CoinMarketCap Pro API base URL
pub const API_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Immutable process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// CoinMarketCap API key (required)
    pub api_key: String,

    /// Upstream base URL
    pub base_url: String,

    /// Whether the response cache is consulted at all
    pub cache_enabled: bool,

    /// Global TTL override in seconds; when set it replaces every
    /// per-endpoint TTL class
    pub cache_ttl_override: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CMC_API_KEY` - required, fatal when missing or empty
    /// - `CMC_API_BASE_URL` - optional base URL override (used by tests)
    /// - `CACHE_ENABLED` - caching is on unless this is exactly "false"
    /// - `CACHE_TTL` - optional TTL override in seconds
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CMC_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(Error::Config(
                "CMC_API_KEY is not set. Provide a CoinMarketCap API key.".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: std::env::var("CMC_API_BASE_URL")
                .unwrap_or_else(|_| API_BASE_URL.to_string()),
            cache_enabled: cache_enabled_from(std::env::var("CACHE_ENABLED").ok()),
            cache_ttl_override: ttl_override_from(std::env::var("CACHE_TTL").ok()),
        })
    }

    /// Build a config directly (tests, embedding)
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            cache_enabled: true,
            cache_ttl_override: None,
        }
    }

    /// API key with everything but the last 4 characters masked, for logging
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count > 4 {
            let tail: String = self.api_key.chars().skip(count - 4).collect();
            format!("****{}", tail)
        } else {
            "****".to_string()
        }
    }
}

fn cache_enabled_from(raw: Option<String>) -> bool {
    raw.as_deref() != Some("false")
}

fn ttl_override_from(raw: Option<String>) -> Option<u64> {
    raw.and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_enabled_default_and_explicit() {
        assert!(cache_enabled_from(None));
        assert!(cache_enabled_from(Some("true".to_string())));
        assert!(cache_enabled_from(Some("1".to_string())));
        assert!(!cache_enabled_from(Some("false".to_string())));
    }

    #[test]
    fn test_ttl_override_parsing() {
        assert_eq!(ttl_override_from(None), None);
        assert_eq!(ttl_override_from(Some("600".to_string())), Some(600));
        assert_eq!(ttl_override_from(Some("not-a-number".to_string())), None);
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config::new("abcdef123456", API_BASE_URL);
        assert_eq!(config.masked_api_key(), "****3456");

        let short = Config::new("ab", API_BASE_URL);
        assert_eq!(short.masked_api_key(), "****");
    }

    #[test]
    fn test_masked_api_key_multibyte() {
        let config = Config::new("ключ-abc-λλλλ", API_BASE_URL);
        assert_eq!(config.masked_api_key(), "****λλλλ");
    }
}
