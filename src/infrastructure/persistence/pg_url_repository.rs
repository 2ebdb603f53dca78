//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_shortcode;

const RECORD_COLUMNS: &str = "id, url, shortcode, access_count, created_at, updated_at";

#[derive(FromRow)]
struct UrlRecordRow {
    id: i64,
    url: String,
    shortcode: String,
    access_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UrlRecordRow> for UrlRecord {
    fn from(r: UrlRecordRow) -> Self {
        UrlRecord::new(
            r.id,
            r.url,
            r.shortcode,
            r.access_count,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for the `url_store` table.
///
/// Every statement acquires a pooled connection for its own duration only.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let sql = format!(
            "INSERT INTO url_store (url, shortcode) VALUES ($1, $2) RETURNING {RECORD_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlRecordRow>(&sql)
            .bind(&new_record.url)
            .bind(&new_record.shortcode)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_shortcode(&e) {
                    AppError::collision(
                        "Shortcode already assigned",
                        json!({ "shortcode": new_record.shortcode }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_shortcode(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM url_store WHERE shortcode = $1");

        let row = sqlx::query_as::<_, UrlRecordRow>(&sql)
            .bind(shortcode)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_access_count(&self, shortcode: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE url_store
            SET access_count = access_count + 1, updated_at = NOW()
            WHERE shortcode = $1
            "#,
        )
        .bind(shortcode)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_url(
        &self,
        shortcode: &str,
        url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!(
            "UPDATE url_store SET url = $2, updated_at = NOW() WHERE shortcode = $1 RETURNING {RECORD_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlRecordRow>(&sql)
            .bind(shortcode)
            .bind(url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn delete_by_shortcode(&self, shortcode: &str) -> Result<Option<UrlRecord>, AppError> {
        let sql = format!("DELETE FROM url_store WHERE shortcode = $1 RETURNING {RECORD_COLUMNS}");

        let row = sqlx::query_as::<_, UrlRecordRow>(&sql)
            .bind(shortcode)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM url_store ORDER BY id");

        let rows = sqlx::query_as::<_, UrlRecordRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
