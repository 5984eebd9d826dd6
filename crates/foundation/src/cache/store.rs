//! In-memory TTL response cache
//!
//! Expiry is lazy: an entry past its deadline is dropped by the `get` that
//! observes it. There is no background sweep, so entries whose keys are
//! never re-read stay resident - acceptable for the low-cardinality request
//! space of a fixed endpoint set.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A cached response and its expiry deadline
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// TTL response cache shared across tool invocations.
///
/// Constructed once per process and handed to the gateway by `Arc`; tests
/// inject their own disposable instance. Interior mutability keeps the
/// public API `&self` so the cache can be shared across tokio tasks.
#[derive(Debug, Default)]
pub struct ResponseCache {
    inner: Mutex<CacheInner>,
}

impl ResponseCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached value.
    ///
    /// An entry whose deadline has passed is treated as absent and removed
    /// as a side effect. Never errors.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().unwrap();

        match inner.entries.get(key) {
            Some(entry) if Instant::now() >= entry.expires_at => {
                inner.entries.remove(key);
                inner.misses += 1;
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Store a value, overwriting any existing entry for `key`.
    ///
    /// `ttl_secs <= 0` stores an entry that is already expired on the next
    /// read.
    pub fn set(&self, key: &str, value: Value, ttl_secs: i64) {
        let ttl = Duration::from_secs(ttl_secs.max(0) as u64);
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        let mut inner = self.inner.lock().unwrap();
        inner.entries.insert(key.to_string(), entry);
    }

    /// Remove a single entry
    pub fn remove(&self, key: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.remove(key);
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
    }

    /// Number of resident entries (expired-but-unread included)
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        let total = inner.hits + inner.misses;
        let hit_rate = if total > 0 {
            inner.hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
            hit_rate,
        }
    }
}

/// Response cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
