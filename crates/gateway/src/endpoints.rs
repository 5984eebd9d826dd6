//! CoinMarketCap endpoint paths and cache TTL classes

/// Fear and Greed Index
pub const FEAR_GREED: &str = "/v3/fear-and-greed/historical";

/// Cryptocurrency endpoints
pub const CRYPTO_LISTINGS: &str = "/v1/cryptocurrency/listings/latest";
pub const CRYPTO_QUOTES: &str = "/v2/cryptocurrency/quotes/latest";
pub const CRYPTO_INFO: &str = "/v2/cryptocurrency/info";
pub const CRYPTO_MARKET_PAIRS: &str = "/v2/cryptocurrency/market-pairs/latest";
pub const CRYPTO_OHLCV_HISTORICAL: &str = "/v2/cryptocurrency/ohlcv/historical";

/// Global metrics
pub const GLOBAL_METRICS: &str = "/v1/global-metrics/quotes/latest";

/// Exchange endpoints
pub const EXCHANGE_LISTINGS: &str = "/v1/exchange/listings/latest";
pub const EXCHANGE_INFO: &str = "/v2/exchange/info";
pub const EXCHANGE_MAP: &str = "/v1/exchange/map";

/// Price conversion
pub const PRICE_CONVERSION: &str = "/v2/tools/price-conversion";

/// API key validation probe
pub const KEY_INFO: &str = "/v1/key/info";

/// Cache TTL classes in seconds.
///
/// Each endpoint picks the class matching how fast its data goes stale;
/// a process-wide `CACHE_TTL` override replaces all of them.
pub mod ttl {
    /// 1 minute - prices and other fast-moving data
    pub const SHORT: u64 = 60;
    /// 5 minutes
    pub const MEDIUM: u64 = 300;
    /// 1 hour - metadata that rarely changes
    pub const LONG: u64 = 3600;
    /// 24 hours - near-static maps
    pub const VERY_LONG: u64 = 86400;
}
