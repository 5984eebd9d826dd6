//! # cmc-foundation
//!
//! Foundation layer for cmc-server:
//! - Error: central error taxonomy shared by every crate
//! - Config: environment-driven process configuration
//! - Cache: in-memory TTL response cache with canonical key derivation

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{cache_key, CacheStats, ResponseCache};
pub use config::{Config, API_BASE_URL};
pub use error::{Error, Result};
