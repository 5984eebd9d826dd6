//! Fear & Greed Index tool

use crate::params::{optional_int_in_range, optional_positive_int};
use crate::r#trait::{Tool, ToolDef};
use async_trait::async_trait;
use cmc_foundation::Result;
use cmc_gateway::{endpoints, Gateway};
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_LIMIT: i64 = 10;

/// Historical CoinMarketCap Fear & Greed Index values
pub struct FearGreedTool {
    gateway: Arc<dyn Gateway>,
}

impl FearGreedTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for FearGreedTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_fear_greed_index",
            "Get historical CoinMarketCap Fear & Greed Index values",
        )
        .integer_param("start", "Starting point of data retrieval (optional)", false)
        .ranged_integer_param(
            "limit",
            "Number of records to return (default: 10, max: 100)",
            1,
            100,
            Some(DEFAULT_LIMIT),
        )
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let limit = optional_int_in_range(
            &params,
            "limit",
            1,
            100,
            "Limit must be an integer between 1 and 100",
        )?;
        let start =
            optional_positive_int(&params, "start", "Start must be a positive integer")?;

        let query = json!({
            "limit": limit.unwrap_or(DEFAULT_LIMIT),
            "start": start.unwrap_or(1),
        });

        Ok(self
            .gateway
            .fetch(endpoints::FEAR_GREED, query, endpoints::ttl::MEDIUM)
            .await?)
    }
}
