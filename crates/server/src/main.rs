//! CoinMarketCap MCP server entry point.

mod protocol;
mod server;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cmc_foundation::{Config, ResponseCache};
use cmc_gateway::{CmcClient, Gateway, GatewayConfig};
use cmc_tool::ToolRegistry;

use crate::server::McpServer;

/// MCP server exposing CoinMarketCap market data as tools
#[derive(Parser, Debug)]
#[command(name = "cmc-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// Override all cache TTLs with a fixed value in seconds
    #[arg(long)]
    cache_ttl: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Stdout carries the JSON-RPC stream, so all logging goes to stderr.
    let default_filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;
    if args.no_cache {
        config.cache_enabled = false;
    }
    if args.cache_ttl.is_some() {
        config.cache_ttl_override = args.cache_ttl;
    }

    info!(
        api_key = %config.masked_api_key(),
        base_url = %config.base_url,
        cache_enabled = config.cache_enabled,
        "starting CoinMarketCap MCP server"
    );

    let cache = Arc::new(ResponseCache::new());
    let client = CmcClient::new(GatewayConfig::from(&config), cache);

    if !client.validate_api_key().await {
        warn!("API key validation failed; upstream requests may be rejected");
    }

    let gateway: Arc<dyn Gateway> = Arc::new(client);
    let registry = ToolRegistry::with_domain_tools(gateway);
    info!(tools = registry.len(), "registered domain tools");

    McpServer::new(registry).run().await
}
