//! Domain tools over the gateway
//!
//! One module per upstream resource area. Every tool holds an injected
//! `Arc<dyn Gateway>` and pairs its endpoint with a TTL class; semantic
//! validation runs before the gateway is ever touched.

pub mod cryptocurrency;
pub mod exchange;
pub mod fear_greed;
pub mod global;
