//! Cryptocurrency tools: listings, quotes, metadata, market pairs,
//! historical OHLCV and price conversion

use crate::params::{
    optional_int_in_range, optional_positive_int, optional_str, required_positive_number,
    required_str,
};
use crate::r#trait::{Tool, ToolDef};
use async_trait::async_trait;
use cmc_foundation::Result;
use cmc_gateway::{endpoints, Gateway};
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_CONVERT: &str = "USD";
const LIMIT_MSG: &str = "Limit must be an integer between 1 and 100";
const START_MSG: &str = "Start must be a positive integer";

/// Latest cryptocurrency listings ranked by market cap
pub struct CryptoListingsTool {
    gateway: Arc<dyn Gateway>,
}

impl CryptoListingsTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for CryptoListingsTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_cryptocurrency_listings",
            "Get the latest cryptocurrency listings with market data",
        )
        .integer_param("start", "Starting point for data retrieval (default: 1)", false)
        .ranged_integer_param(
            "limit",
            "Number of results to return (default: 10, max: 100)",
            1,
            100,
            Some(DEFAULT_LIMIT),
        )
        .string_param("convert", "Currency to convert prices to (default: USD)", false)
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let limit = optional_int_in_range(&params, "limit", 1, 100, LIMIT_MSG)?;
        let start = optional_positive_int(&params, "start", START_MSG)?;
        let convert =
            optional_str(&params, "convert").unwrap_or_else(|| DEFAULT_CONVERT.to_string());

        let mut query = json!({
            "limit": limit.unwrap_or(DEFAULT_LIMIT),
            "convert": convert,
        });
        if let Some(start) = start {
            query["start"] = json!(start);
        }

        Ok(self
            .gateway
            .fetch(endpoints::CRYPTO_LISTINGS, query, endpoints::ttl::SHORT)
            .await?)
    }
}

/// Latest quotes for specific cryptocurrencies
pub struct CryptoQuotesTool {
    gateway: Arc<dyn Gateway>,
}

impl CryptoQuotesTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for CryptoQuotesTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_cryptocurrency_quotes",
            "Get the latest quotes for specific cryptocurrencies",
        )
        .string_param(
            "symbol",
            "Cryptocurrency symbol(s), comma-separated (e.g., \"BTC,ETH\")",
            true,
        )
        .string_param("convert", "Currency to convert price to (default: USD)", false)
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let symbol = required_str(&params, "symbol")?;
        let convert =
            optional_str(&params, "convert").unwrap_or_else(|| DEFAULT_CONVERT.to_string());

        Ok(self
            .gateway
            .fetch(
                endpoints::CRYPTO_QUOTES,
                json!({"symbol": symbol, "convert": convert}),
                endpoints::ttl::SHORT,
            )
            .await?)
    }
}

/// Static metadata for specific cryptocurrencies
pub struct CryptoInfoTool {
    gateway: Arc<dyn Gateway>,
}

impl CryptoInfoTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for CryptoInfoTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_cryptocurrency_info",
            "Get metadata for specific cryptocurrencies",
        )
        .string_param(
            "symbol",
            "Cryptocurrency symbol(s), comma-separated (e.g., \"BTC,ETH\")",
            true,
        )
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let symbol = required_str(&params, "symbol")?;

        Ok(self
            .gateway
            .fetch(
                endpoints::CRYPTO_INFO,
                json!({ "symbol": symbol }),
                endpoints::ttl::LONG,
            )
            .await?)
    }
}

/// Market pairs for a cryptocurrency
pub struct CryptoMarketPairsTool {
    gateway: Arc<dyn Gateway>,
}

impl CryptoMarketPairsTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for CryptoMarketPairsTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_cryptocurrency_market_pairs",
            "Get market pairs for a cryptocurrency",
        )
        .string_param("symbol", "Cryptocurrency symbol (e.g., \"BTC\")", true)
        .ranged_integer_param(
            "limit",
            "Number of results to return (default: 10, max: 100)",
            1,
            100,
            Some(DEFAULT_LIMIT),
        )
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let symbol = required_str(&params, "symbol")?;
        let limit = optional_int_in_range(&params, "limit", 1, 100, LIMIT_MSG)?;

        Ok(self
            .gateway
            .fetch(
                endpoints::CRYPTO_MARKET_PAIRS,
                json!({"symbol": symbol, "limit": limit.unwrap_or(DEFAULT_LIMIT)}),
                endpoints::ttl::MEDIUM,
            )
            .await?)
    }
}

/// Historical OHLCV data for a cryptocurrency
pub struct CryptoOhlcvTool {
    gateway: Arc<dyn Gateway>,
}

impl CryptoOhlcvTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for CryptoOhlcvTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_cryptocurrency_ohlcv",
            "Get historical OHLCV data for a cryptocurrency",
        )
        .string_param("symbol", "Cryptocurrency symbol (e.g., \"BTC\")", true)
        .string_param("convert", "Currency to convert to (default: USD)", false)
        .string_param("time_start", "Start time in ISO 8601 format", false)
        .string_param("time_end", "End time in ISO 8601 format", false)
        .string_param("interval", "Time interval (e.g., \"daily\", \"hourly\")", false)
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let symbol = required_str(&params, "symbol")?;
        let convert =
            optional_str(&params, "convert").unwrap_or_else(|| DEFAULT_CONVERT.to_string());
        let interval = optional_str(&params, "interval").unwrap_or_else(|| "daily".to_string());

        let mut query = json!({
            "symbol": symbol,
            "convert": convert,
            "interval": interval,
        });
        if let Some(time_start) = optional_str(&params, "time_start") {
            query["time_start"] = json!(time_start);
        }
        if let Some(time_end) = optional_str(&params, "time_end") {
            query["time_end"] = json!(time_end);
        }

        Ok(self
            .gateway
            .fetch(
                endpoints::CRYPTO_OHLCV_HISTORICAL,
                query,
                endpoints::ttl::LONG,
            )
            .await?)
    }
}

/// Convert an amount of one cryptocurrency into another currency
pub struct ConvertCryptoTool {
    gateway: Arc<dyn Gateway>,
}

impl ConvertCryptoTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ConvertCryptoTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "convert_cryptocurrency",
            "Convert an amount of one cryptocurrency to another currency",
        )
        .number_param("amount", "Amount to convert", true)
        .string_param("symbol", "Source cryptocurrency symbol (e.g., \"BTC\")", true)
        .string_param(
            "convert",
            "Target currency to convert to (e.g., \"USD\", \"EUR\", \"ETH\")",
            true,
        )
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let amount =
            required_positive_number(&params, "amount", "Amount must be a positive number")?;
        let symbol = required_str(&params, "symbol")?;
        let convert = required_str(&params, "convert")?;

        Ok(self
            .gateway
            .fetch(
                endpoints::PRICE_CONVERSION,
                json!({"amount": amount, "symbol": symbol, "convert": convert}),
                endpoints::ttl::SHORT,
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::MockGateway;
    use cmc_gateway::UpstreamError;
    use serde_json::json;

    #[tokio::test]
    async fn test_listings_defaults() {
        let gateway = MockGateway::ok(json!([]));
        let tool = CryptoListingsTool::new(gateway.clone());

        tool.execute(json!({})).await.unwrap();

        let (endpoint, query, ttl) = gateway.last_request().unwrap();
        assert_eq!(endpoint, endpoints::CRYPTO_LISTINGS);
        assert_eq!(query, json!({"limit": 10, "convert": "USD"}));
        assert_eq!(ttl, endpoints::ttl::SHORT);
    }

    #[tokio::test]
    async fn test_listings_limit_validated_before_fetch() {
        let gateway = MockGateway::ok(json!([]));
        let tool = CryptoListingsTool::new(gateway.clone());

        let err = tool.execute(json!({"limit": 0})).await.unwrap_err();

        assert_eq!(err.to_string(), LIMIT_MSG);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_quotes_requires_symbol() {
        let gateway = MockGateway::ok(json!({}));
        let tool = CryptoQuotesTool::new(gateway.clone());

        let err = tool.execute(json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing required parameter: symbol");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_quotes_forwards_symbol_and_default_convert() {
        let gateway = MockGateway::ok(json!({}));
        let tool = CryptoQuotesTool::new(gateway.clone());

        tool.execute(json!({"symbol": "BTC,ETH"})).await.unwrap();

        let (_, query, _) = gateway.last_request().unwrap();
        assert_eq!(query, json!({"symbol": "BTC,ETH", "convert": "USD"}));
    }

    #[tokio::test]
    async fn test_info_uses_long_ttl() {
        let gateway = MockGateway::ok(json!({}));
        let tool = CryptoInfoTool::new(gateway.clone());

        tool.execute(json!({"symbol": "BTC"})).await.unwrap();

        let (endpoint, _, ttl) = gateway.last_request().unwrap();
        assert_eq!(endpoint, endpoints::CRYPTO_INFO);
        assert_eq!(ttl, endpoints::ttl::LONG);
    }

    #[tokio::test]
    async fn test_ohlcv_skips_absent_time_bounds() {
        let gateway = MockGateway::ok(json!({}));
        let tool = CryptoOhlcvTool::new(gateway.clone());

        tool.execute(json!({"symbol": "BTC"})).await.unwrap();

        let (_, query, _) = gateway.last_request().unwrap();
        assert_eq!(
            query,
            json!({"symbol": "BTC", "convert": "USD", "interval": "daily"})
        );
    }

    #[tokio::test]
    async fn test_convert_rejects_non_positive_amount() {
        let gateway = MockGateway::ok(json!({}));
        let tool = ConvertCryptoTool::new(gateway.clone());

        let err = tool
            .execute(json!({"amount": -1, "symbol": "BTC", "convert": "USD"}))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Amount must be a positive number");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_error_bubbles_with_message() {
        let gateway = MockGateway::failing(UpstreamError::RateLimited);
        let tool = CryptoListingsTool::new(gateway);

        let err = tool.execute(json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "Rate limit exceeded");
    }
}
