//! Exchange tools: listings, metadata and the exchange map

use crate::params::{optional_int_in_range, optional_positive_int, optional_str};
use crate::r#trait::{Tool, ToolDef};
use async_trait::async_trait;
use cmc_foundation::{Error, Result};
use cmc_gateway::{endpoints, Gateway};
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_LIMIT: i64 = 10;
const LIMIT_MSG: &str = "Limit must be an integer between 1 and 100";
const START_MSG: &str = "Start must be a positive integer";

/// Latest exchange listings
pub struct ExchangeListingsTool {
    gateway: Arc<dyn Gateway>,
}

impl ExchangeListingsTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ExchangeListingsTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder("get_exchange_listings", "Get the latest exchange listings")
            .integer_param("start", "Starting point for data retrieval (default: 1)", false)
            .ranged_integer_param(
                "limit",
                "Number of results to return (default: 10, max: 100)",
                1,
                100,
                Some(DEFAULT_LIMIT),
            )
            .string_param("sort", "Sort field (e.g., \"volume_24h\")", false)
            .string_param("sort_dir", "Sort direction (\"asc\" or \"desc\")", false)
            .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let limit = optional_int_in_range(&params, "limit", 1, 100, LIMIT_MSG)?;
        let start = optional_positive_int(&params, "start", START_MSG)?;

        let mut query = json!({"limit": limit.unwrap_or(DEFAULT_LIMIT)});
        if let Some(start) = start {
            query["start"] = json!(start);
        }
        if let Some(sort) = optional_str(&params, "sort") {
            query["sort"] = json!(sort);
        }
        if let Some(sort_dir) = optional_str(&params, "sort_dir") {
            query["sort_dir"] = json!(sort_dir);
        }

        Ok(self
            .gateway
            .fetch(endpoints::EXCHANGE_LISTINGS, query, endpoints::ttl::MEDIUM)
            .await?)
    }
}

/// Exchange metadata looked up by id or slug
pub struct ExchangeInfoTool {
    gateway: Arc<dyn Gateway>,
}

impl ExchangeInfoTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ExchangeInfoTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder("get_exchange_info", "Get metadata for specific exchanges")
            .string_param("id", "Exchange ID(s), comma-separated (e.g., \"1,2\")", false)
            .string_param(
                "slug",
                "Exchange slug(s), comma-separated (e.g., \"binance,coinbase\")",
                false,
            )
            .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let id = optional_str(&params, "id");
        let slug = optional_str(&params, "slug");

        if id.is_none() && slug.is_none() {
            return Err(Error::validation("Either id or slug parameter is required"));
        }

        let mut query = json!({});
        if let Some(id) = id {
            query["id"] = json!(id);
        }
        if let Some(slug) = slug {
            query["slug"] = json!(slug);
        }

        Ok(self
            .gateway
            .fetch(endpoints::EXCHANGE_INFO, query, endpoints::ttl::LONG)
            .await?)
    }
}

/// Map of all exchanges
pub struct ExchangeMapTool {
    gateway: Arc<dyn Gateway>,
}

impl ExchangeMapTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ExchangeMapTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder("get_exchange_map", "Get a map of all exchanges")
            .ranged_integer_param(
                "limit",
                "Number of results to return (default: 10, max: 100)",
                1,
                100,
                Some(DEFAULT_LIMIT),
            )
            .integer_param("start", "Starting point for data retrieval (default: 1)", false)
            .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let limit = optional_int_in_range(&params, "limit", 1, 100, LIMIT_MSG)?;
        let start = optional_positive_int(&params, "start", START_MSG)?;

        Ok(self
            .gateway
            .fetch(
                endpoints::EXCHANGE_MAP,
                json!({
                    "limit": limit.unwrap_or(DEFAULT_LIMIT),
                    "start": start.unwrap_or(1),
                }),
                endpoints::ttl::VERY_LONG,
            )
            .await?)
    }
}
