//! DTO for the per-shortcode statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Response for `GET /shorten/{code}/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub shortcode: String,
    pub url: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            shortcode: record.shortcode,
            url: record.url,
            access_count: record.access_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
