//! Tool Registry - registration plus the invoke chokepoint
//!
//! `invoke` is where the boundary contract is enforced: whatever happens
//! inside a handler, the caller gets a well-formed `ToolResult` back.

use crate::r#trait::{Tool, ToolDef, ToolResult};
use cmc_gateway::Gateway;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with every domain tool wired to `gateway`
    pub fn with_domain_tools(gateway: Arc<dyn Gateway>) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(crate::domain::cryptocurrency::CryptoListingsTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::cryptocurrency::CryptoQuotesTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::cryptocurrency::CryptoInfoTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(
            crate::domain::cryptocurrency::CryptoMarketPairsTool::new(gateway.clone()),
        ));
        registry.register(Arc::new(crate::domain::cryptocurrency::CryptoOhlcvTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::cryptocurrency::ConvertCryptoTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::exchange::ExchangeListingsTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::exchange::ExchangeInfoTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::exchange::ExchangeMapTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::global::GlobalMetricsTool::new(
            gateway.clone(),
        )));
        registry.register(Arc::new(crate::domain::fear_greed::FearGreedTool::new(
            gateway,
        )));

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool definitions (for tools/list)
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Get all tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Invoke a tool by name.
    ///
    /// Always resolves to a `ToolResult`: unknown tools, missing required
    /// parameters, validation failures and upstream errors all come back as
    /// error results, never as propagated errors.
    pub async fn invoke(&self, name: &str, params: Value) -> ToolResult {
        let Some(tool) = self.get(name) else {
            return ToolResult::error(format!("Unknown tool: {}", name));
        };

        let def = tool.definition();
        for required in &def.parameters.required {
            if params.get(required).map_or(true, Value::is_null) {
                return ToolResult::error(format!("Missing required parameter: {}", required));
            }
        }

        match tool.execute(params).await {
            Ok(value) => ToolResult::json(&value),
            Err(e) => {
                warn!(tool = name, error = %e, "tool invocation failed");
                ToolResult::error(e.to_string())
            }
        }
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
