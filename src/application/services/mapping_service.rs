//! URL mapping service: store/cache orchestration for every operation.
//!
//! # Consistency rules
//!
//! - Mutations hit the store first; the cache is updated or invalidated after
//!   the store has committed.
//! - Reads try the cache first and fall back to the store on a miss, writing
//!   the result back into the cache.
//! - The cache is advisory. A failing cache is logged and treated as a miss;
//!   it never fails a request the store could serve.
//! - The `all_records` snapshot is recomputed from the store after every
//!   create, update, and delete.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheKey, CacheService};
use crate::utils::shortener::{Sha256Shortener, Shortener};

/// Result of `create` and `update`.
///
/// `shortened_url` carries the long URL the shortcode currently resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    pub shortcode: String,
    pub shortened_url: String,
}

impl ShortenedUrl {
    pub fn new(shortcode: impl Into<String>, shortened_url: impl Into<String>) -> Self {
        Self {
            shortcode: shortcode.into(),
            shortened_url: shortened_url.into(),
        }
    }
}

/// Result of `delete`.
///
/// The HTTP surface only exposes [`DeleteConfirmation::message`], which is the
/// same whether or not the record existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub shortcode: String,
    pub existed: bool,
}

impl DeleteConfirmation {
    pub fn message(&self) -> String {
        format!("Successfully deleted {}", self.shortcode)
    }
}

/// Service implementing create/read/update/delete/list over the store and cache.
///
/// Both handles are injected at construction; the service holds no global state.
pub struct MappingService<R: UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    shortener: Arc<dyn Shortener>,
}

impl<R: UrlRepository> MappingService<R> {
    /// Creates a service using the SHA-256 shortener.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self::with_shortener(repository, cache, Arc::new(Sha256Shortener))
    }

    /// Creates a service with a custom shortcode strategy.
    pub fn with_shortener(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        shortener: Arc<dyn Shortener>,
    ) -> Self {
        Self {
            repository,
            cache,
            shortener,
        }
    }

    /// Shortens `url`, reusing an existing mapping when one is known.
    ///
    /// # Flow
    ///
    /// 1. Dedup index hit → return the cached shortcode without touching the store
    /// 2. Derive the shortcode and insert the record
    /// 3. Write the dedup entry and refresh the snapshot
    ///
    /// If the insert hits the unique constraint and the existing record holds the
    /// same URL, that record is returned. This is how concurrent creates of one
    /// URL converge.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Collision`] if the shortcode belongs to a different URL.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, url: &str) -> Result<ShortenedUrl, AppError> {
        let dedup_key = CacheKey::dedup(url);

        if let Some(shortcode) = self.cache_get(&dedup_key).await {
            return Ok(ShortenedUrl::new(shortcode, url));
        }

        let shortcode = self.shortener.shorten(url);
        let new_record = NewUrlRecord {
            url: url.to_string(),
            shortcode: shortcode.clone(),
        };

        let record = match self.repository.create(new_record).await {
            Ok(record) => {
                info!(shortcode = %record.shortcode, id = record.id, "Created short URL");
                record
            }
            Err(AppError::Collision { .. }) => self.resolve_collision(url, &shortcode).await?,
            Err(e) => return Err(e),
        };

        self.cache_set(&dedup_key, &record.shortcode).await;
        self.sync_snapshot().await;

        Ok(ShortenedUrl::new(record.shortcode, record.url))
    }

    /// Resolves a shortcode to its long URL.
    ///
    /// When `update_access_count` is true the store counter is incremented on
    /// every call, including redirect-index hits. If the increment finds no
    /// record, the code is reported missing and any stale redirect entry is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this shortcode.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn read(&self, shortcode: &str, update_access_count: bool) -> Result<String, AppError> {
        let redirect_key = CacheKey::redirect(shortcode);

        if update_access_count && !self.repository.increment_access_count(shortcode).await? {
            self.cache_invalidate(&redirect_key).await;
            return Err(not_found(shortcode));
        }

        if let Some(url) = self.cache_get(&redirect_key).await {
            return Ok(url);
        }

        let record = self
            .repository
            .find_by_shortcode(shortcode)
            .await?
            .ok_or_else(|| not_found(shortcode))?;

        self.cache_set(&redirect_key, &record.url).await;

        Ok(record.url)
    }

    /// Points an existing shortcode at a new long URL.
    ///
    /// The shortcode itself never changes. The redirect entry is overwritten,
    /// the dedup entry of the previous URL is dropped, and the snapshot is
    /// refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this shortcode.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, shortcode: &str, new_url: &str) -> Result<ShortenedUrl, AppError> {
        let existing = self
            .repository
            .find_by_shortcode(shortcode)
            .await?
            .ok_or_else(|| not_found(shortcode))?;

        let updated = self
            .repository
            .update_url(shortcode, new_url)
            .await?
            .ok_or_else(|| not_found(shortcode))?;

        info!(shortcode, "Updated short URL");

        self.cache_set(&CacheKey::redirect(shortcode), &updated.url)
            .await;
        if existing.url != updated.url {
            self.cache_invalidate(&CacheKey::dedup(&existing.url)).await;
        }
        self.sync_snapshot().await;

        Ok(ShortenedUrl::new(updated.shortcode, updated.url))
    }

    /// Deletes a shortcode. Deleting a missing code is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, shortcode: &str) -> Result<DeleteConfirmation, AppError> {
        let removed = self.repository.delete_by_shortcode(shortcode).await?;

        self.cache_invalidate(&CacheKey::redirect(shortcode)).await;

        match &removed {
            Some(record) => {
                info!(shortcode, "Deleted short URL");
                self.cache_invalidate(&CacheKey::dedup(&record.url)).await;
            }
            None => debug!(shortcode, "Delete of unknown shortcode"),
        }

        self.sync_snapshot().await;

        Ok(DeleteConfirmation {
            shortcode: shortcode.to_string(),
            existed: removed.is_some(),
        })
    }

    /// Lists every `{url, shortcode}` pair, served from the snapshot when present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_all(&self) -> Result<Vec<UrlSummary>, AppError> {
        if let Some(raw) = self.cache_get(&CacheKey::AllRecords).await {
            match serde_json::from_str::<Vec<UrlSummary>>(&raw) {
                Ok(summaries) => return Ok(summaries),
                Err(e) => warn!(error = %e, "Discarding undecodable all_records snapshot"),
            }
        }

        self.refresh_snapshot().await
    }

    /// Recomputes the `all_records` snapshot from the store and writes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn refresh_snapshot(&self) -> Result<Vec<UrlSummary>, AppError> {
        let summaries: Vec<UrlSummary> = self
            .repository
            .list_all()
            .await?
            .iter()
            .map(UrlRecord::summary)
            .collect();

        match serde_json::to_string(&summaries) {
            Ok(raw) => self.cache_set(&CacheKey::AllRecords, &raw).await,
            Err(e) => warn!(error = %e, "Failed to serialize all_records snapshot"),
        }

        Ok(summaries)
    }

    /// Returns the full stored record, including the access counter.
    ///
    /// Always reads the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this shortcode.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats(&self, shortcode: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_shortcode(shortcode)
            .await?
            .ok_or_else(|| not_found(shortcode))
    }

    /// Lists every stored record. Always reads the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn records(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.list_all().await
    }

    /// Store health probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Returns the cache handle the service writes through.
    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    async fn resolve_collision(&self, url: &str, shortcode: &str) -> Result<UrlRecord, AppError> {
        match self.repository.find_by_shortcode(shortcode).await? {
            Some(existing) if existing.url == url => {
                debug!(shortcode, "Insert raced with an identical create");
                Ok(existing)
            }
            _ => {
                metrics::counter!("shortcode_collisions_total").increment(1);
                warn!(shortcode, url, "Shortcode collision");
                Err(AppError::collision(
                    "Shortcode already assigned to a different URL",
                    json!({ "shortcode": shortcode, "url": url }),
                ))
            }
        }
    }

    /// Refreshes the snapshot after a mutation that has already committed.
    ///
    /// A store failure here must not fail the mutation, so the stale snapshot
    /// is dropped instead and rebuilt by the next `list_all`.
    async fn sync_snapshot(&self) {
        if let Err(e) = self.refresh_snapshot().await {
            warn!(error = %e, "Snapshot refresh failed, invalidating");
            self.cache_invalidate(&CacheKey::AllRecords).await;
        }
    }

    async fn cache_get(&self, key: &CacheKey) -> Option<String> {
        match self.cache.get(key).await {
            Ok(Some(value)) => {
                metrics::counter!("cache_lookups_total", "index" => key.index(), "result" => "hit")
                    .increment(1);
                debug!(index = key.index(), "Cache HIT");
                Some(value)
            }
            Ok(None) => {
                metrics::counter!("cache_lookups_total", "index" => key.index(), "result" => "miss")
                    .increment(1);
                debug!(index = key.index(), "Cache MISS");
                None
            }
            Err(e) => {
                metrics::counter!("cache_lookups_total", "index" => key.index(), "result" => "error")
                    .increment(1);
                warn!(error = %e, index = key.index(), "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn cache_set(&self, key: &CacheKey, value: &str) {
        if let Err(e) = self.cache.set(key, value).await {
            warn!(error = %e, index = key.index(), "Cache write failed");
        }
    }

    async fn cache_invalidate(&self, key: &CacheKey) {
        if let Err(e) = self.cache.invalidate(key).await {
            warn!(error = %e, index = key.index(), "Cache invalidation failed");
        }
    }
}

fn not_found(shortcode: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "shortcode": shortcode }))
}
