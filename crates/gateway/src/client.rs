//! CoinMarketCap API client
//!
//! Owns the HTTP client and the cache-consulting fetch path. Exactly one
//! network call happens per genuine cache miss; a hit never touches the
//! network.

use crate::endpoints;
use crate::error::UpstreamError;
use crate::r#trait::Gateway;
use async_trait::async_trait;
use cmc_foundation::{cache_key, Config, ResponseCache};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Gateway configuration, immutable after construction
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub cache_enabled: bool,
    /// Process-wide TTL override; replaces the caller-supplied TTL class
    pub ttl_override: Option<u64>,
}

impl From<&Config> for GatewayConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            cache_enabled: config.cache_enabled,
            ttl_override: config.cache_ttl_override,
        }
    }
}

/// HTTP client for the CoinMarketCap API with the response cache in front
pub struct CmcClient {
    http: reqwest::Client,
    config: GatewayConfig,
    cache: Arc<ResponseCache>,
}

impl CmcClient {
    /// Create a client over a shared response cache.
    ///
    /// The cache is constructed once per process and injected here so tests
    /// can hand in an isolated store.
    pub fn new(config: GatewayConfig, cache: Arc<ResponseCache>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            cache,
        }
    }

    /// Issue the authenticated GET and decode the body.
    async fn request(&self, endpoint: &str, params: &Value) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.config.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header("Accept", "application/json")
            .query(&query_pairs(params))
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::from_http_status(status, &body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("Invalid response body: {}", e)))
    }

    /// Lightweight authenticated probe of the key-info endpoint.
    ///
    /// Advisory only: the result is logged at startup and never blocks
    /// operation.
    pub async fn validate_api_key(&self) -> bool {
        let url = format!("{}{}", self.config.base_url, endpoints::KEY_INFO);

        match self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl Gateway for CmcClient {
    /// Cached fetch.
    ///
    /// Concurrent misses for the same key each go upstream independently;
    /// there is no in-flight coalescing.
    async fn fetch(
        &self,
        endpoint: &str,
        params: Value,
        ttl_secs: u64,
    ) -> Result<Value, UpstreamError> {
        if !self.config.cache_enabled {
            return self.request(endpoint, &params).await;
        }

        let key = cache_key(endpoint, &params);
        if let Some(value) = self.cache.get(&key) {
            debug!(endpoint, "cache hit");
            return Ok(value);
        }

        let value = self.request(endpoint, &params).await?;

        let effective_ttl = self.config.ttl_override.unwrap_or(ttl_secs);
        self.cache.set(&key, value.clone(), effective_ttl as i64);
        debug!(endpoint, ttl_secs = effective_ttl, "cached upstream response");

        Ok(value)
    }
}

/// Flatten a JSON parameter object into query pairs, skipping nulls
fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Some(obj) = params.as_object() else {
        return vec![];
    };

    obj.iter()
        .filter_map(|(k, v)| {
            let rendered = match v {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((k.clone(), rendered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> GatewayConfig {
        GatewayConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            cache_enabled: true,
            ttl_override: None,
        }
    }

    fn envelope(data: Value) -> Value {
        json!({
            "status": {
                "timestamp": "2024-01-01T00:00:00.000Z",
                "error_code": 0,
                "error_message": null,
                "elapsed": 3,
                "credit_count": 1
            },
            "data": data
        })
    }

    #[test]
    fn test_query_pairs_skips_nulls() {
        let pairs = query_pairs(&json!({
            "limit": 10,
            "convert": "USD",
            "time_start": null
        }));

        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("convert".to_string(), "USD".to_string())));
    }

    #[tokio::test]
    async fn test_second_fetch_within_ttl_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/cryptocurrency/listings/latest"))
            .and(header(API_KEY_HEADER, "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{"id": 1}]))))
            .expect(1)
            .mount(&server)
            .await;

        let client = CmcClient::new(test_config(&server), Arc::new(ResponseCache::new()));

        let first = client
            .fetch(
                endpoints::CRYPTO_LISTINGS,
                json!({"limit": 10, "convert": "USD"}),
                300,
            )
            .await
            .unwrap();

        // Same parameters, different construction order: must be a hit
        let second = client
            .fetch(
                endpoints::CRYPTO_LISTINGS,
                json!({"convert": "USD", "limit": 10}),
                300,
            )
            .await
            .unwrap();

        assert_eq!(first, second);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_one_more_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/fear-and-greed/historical"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
            .expect(2)
            .mount(&server)
            .await;

        // ttl_override of 0 stores entries already expired on next read
        let mut config = test_config(&server);
        config.ttl_override = Some(0);
        let client = CmcClient::new(config, Arc::new(ResponseCache::new()));

        client
            .fetch(endpoints::FEAR_GREED, json!({"limit": 10}), 300)
            .await
            .unwrap();
        client
            .fetch(endpoints::FEAR_GREED, json!({"limit": 10}), 300)
            .await
            .unwrap();

        server.verify().await;
    }

    #[tokio::test]
    async fn test_cache_disabled_always_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/global-metrics/quotes/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = test_config(&server);
        config.cache_enabled = false;
        let cache = Arc::new(ResponseCache::new());
        let client = CmcClient::new(config, cache.clone());

        client
            .fetch(endpoints::GLOBAL_METRICS, json!({"convert": "USD"}), 60)
            .await
            .unwrap();
        client
            .fetch(endpoints::GLOBAL_METRICS, json!({"convert": "USD"}), 60)
            .await
            .unwrap();

        assert!(cache.is_empty());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_params_become_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/cryptocurrency/quotes/latest"))
            .and(query_param("symbol", "BTC,ETH"))
            .and(query_param("convert", "USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(1)
            .mount(&server)
            .await;

        let client = CmcClient::new(test_config(&server), Arc::new(ResponseCache::new()));
        client
            .fetch(
                endpoints::CRYPTO_QUOTES,
                json!({"symbol": "BTC,ETH", "convert": "USD"}),
                60,
            )
            .await
            .unwrap();

        server.verify().await;
    }

    #[tokio::test]
    async fn test_upstream_401_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": {"error_code": 1002, "error_message": "API key missing."}
            })))
            .mount(&server)
            .await;

        let client = CmcClient::new(test_config(&server), Arc::new(ResponseCache::new()));
        let err = client
            .fetch(endpoints::CRYPTO_LISTINGS, json!({}), 60)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API key missing or invalid");
    }

    #[tokio::test]
    async fn test_failed_call_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let cache = Arc::new(ResponseCache::new());
        let client = CmcClient::new(test_config(&server), cache.clone());

        for _ in 0..2 {
            let err = client
                .fetch(endpoints::CRYPTO_LISTINGS, json!({"limit": 10}), 60)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("Server error"));
        }

        assert!(cache.is_empty());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_validate_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/key/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .mount(&server)
            .await;

        let client = CmcClient::new(test_config(&server), Arc::new(ResponseCache::new()));
        assert!(client.validate_api_key().await);
    }

    #[tokio::test]
    async fn test_validate_api_key_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/key/info"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = CmcClient::new(test_config(&server), Arc::new(ResponseCache::new()));
        assert!(!client.validate_api_key().await);
    }
}
