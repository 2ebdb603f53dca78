//! Cache service trait, keyspace, and error types.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A key in the cache keyspace.
///
/// The three indexes live in one backend, so every key carries its index in
/// the rendered form. A URL can never collide with a shortcode or with the
/// snapshot key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Long URL → shortcode.
    Dedup(String),
    /// Shortcode → long URL.
    Redirect(String),
    /// JSON snapshot of every `{url, shortcode}` pair.
    AllRecords,
}

impl CacheKey {
    pub fn dedup(url: impl Into<String>) -> Self {
        Self::Dedup(url.into())
    }

    pub fn redirect(shortcode: impl Into<String>) -> Self {
        Self::Redirect(shortcode.into())
    }

    /// Label of the index this key belongs to, used for logs and metrics.
    pub fn index(&self) -> &'static str {
        match self {
            Self::Dedup(_) => "dedup",
            Self::Redirect(_) => "redirect",
            Self::AllRecords => "all_records",
        }
    }

    /// Renders the backend key under a namespace prefix.
    pub fn render(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dedup(url) => write!(f, "dedup:{}", url),
            Self::Redirect(code) => write!(f, "redirect:{}", code),
            Self::AllRecords => f.write_str("all_records"),
        }
    }
}

/// Key-value cache in front of the URL store.
///
/// Entries never expire; they are only overwritten or invalidated. Values are
/// advisory: callers must treat an error like a miss and keep the store as the
/// source of truth.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn set(&self, key: &CacheKey, value: &str) -> CacheResult<()>;

    /// Removes `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn invalidate(&self, key: &CacheKey) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
