//! # cmc-gateway
//!
//! Gateway to the CoinMarketCap REST API:
//! - `Gateway`: the one-method fetch capability domain tools are built on
//! - `CmcClient`: reqwest-backed implementation with the response cache in
//!   front of it
//! - `UpstreamError`: HTTP failure classification
//! - endpoint path constants and TTL classes

pub mod client;
pub mod endpoints;
pub mod error;
pub mod r#trait;

pub use client::{CmcClient, GatewayConfig};
pub use error::UpstreamError;
pub use r#trait::Gateway;
