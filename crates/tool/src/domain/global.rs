//! Global market metrics tool

use crate::params::optional_str;
use crate::r#trait::{Tool, ToolDef};
use async_trait::async_trait;
use cmc_foundation::Result;
use cmc_gateway::{endpoints, Gateway};
use serde_json::{json, Value};
use std::sync::Arc;

/// Latest global cryptocurrency market metrics
pub struct GlobalMetricsTool {
    gateway: Arc<dyn Gateway>,
}

impl GlobalMetricsTool {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for GlobalMetricsTool {
    fn definition(&self) -> ToolDef {
        ToolDef::builder(
            "get_global_metrics",
            "Get the latest global cryptocurrency market metrics",
        )
        .string_param("convert", "Currency to convert metrics to (default: USD)", false)
        .build()
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        let convert = optional_str(&params, "convert").unwrap_or_else(|| "USD".to_string());

        Ok(self
            .gateway
            .fetch(
                endpoints::GLOBAL_METRICS,
                json!({ "convert": convert }),
                endpoints::ttl::SHORT,
            )
            .await?)
    }
}
