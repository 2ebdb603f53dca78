//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable URL store.
///
/// The store is the source of truth for every mapping. It enforces shortcode
/// uniqueness; callers must never rely on the cache to detect collisions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `access_count = 0` and both timestamps set to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Collision`] if the shortcode is already assigned.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_shortcode(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Increments `access_count` and refreshes `updated_at`.
    ///
    /// Returns `Ok(false)` if no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_access_count(&self, shortcode: &str) -> Result<bool, AppError>;

    /// Replaces the long URL of a record and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` if no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_url(&self, shortcode: &str, url: &str)
    -> Result<Option<UrlRecord>, AppError>;

    /// Deletes a record, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_shortcode(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns every record ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Checks that the store answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
