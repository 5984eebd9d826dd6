//! Gateway trait - the fetch capability injected into domain tools
//!
//! Domain tools hold an `Arc<dyn Gateway>` instead of extending a base
//! service, so tests substitute a mock that counts calls and returns canned
//! payloads.

use crate::error::UpstreamError;
use async_trait::async_trait;
use serde_json::Value;

/// A parameterized fetch against the upstream API
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch `endpoint` with `params` as the query string, consulting the
    /// response cache with `ttl_secs` as the store TTL on a miss.
    async fn fetch(&self, endpoint: &str, params: Value, ttl_secs: u64)
        -> Result<Value, UpstreamError>;
}
