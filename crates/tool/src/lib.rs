//! # cmc-tool
//!
//! Tool system for cmc-server providing:
//! - Tool trait and schema-described tool definitions
//! - ToolResult: the only shape crossing the tool boundary
//! - ToolRegistry: registration plus the never-throws invoke chokepoint
//! - Domain tools over the gateway (cryptocurrency, exchange, global
//!   metrics, fear & greed)

pub mod domain;
mod params;
pub mod registry;
pub mod r#trait;

pub use r#trait::{Tool, ToolContent, ToolDef, ToolDefBuilder, ToolParameters, ToolResult};
pub use registry::ToolRegistry;

// Re-export domain tools
pub use domain::{
    cryptocurrency::{
        ConvertCryptoTool, CryptoInfoTool, CryptoListingsTool, CryptoMarketPairsTool,
        CryptoOhlcvTool, CryptoQuotesTool,
    },
    exchange::{ExchangeInfoTool, ExchangeListingsTool, ExchangeMapTool},
    fear_greed::FearGreedTool,
    global::GlobalMetricsTool,
};
