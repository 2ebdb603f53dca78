//! No-op cache implementation for disabled caching.

use super::service::{CacheKey, CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup misses, so every operation goes straight to the store.
/// Selected with `CACHE_BACKEND=none`.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &CacheKey, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _key: &CacheKey) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
