//! Response Caching
//!
//! In-memory TTL cache that sits in front of the upstream API, plus the
//! canonical key derivation that identifies logically-equal requests.

mod key;
mod store;

pub use key::cache_key;
pub use store::{CacheStats, ResponseCache};
