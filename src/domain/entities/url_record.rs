//! URL record entity representing a stored long URL ↔ shortcode mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted URL mapping.
///
/// The store is the only owner of these records. `shortcode` is assigned once
/// at creation and never regenerated, even when `url` is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub shortcode: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        url: String,
        shortcode: String,
        access_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            shortcode,
            access_count,
            created_at,
            updated_at,
        }
    }

    /// Projects the record to the `{url, shortcode}` pair used by listings.
    pub fn summary(&self) -> UrlSummary {
        UrlSummary {
            url: self.url.clone(),
            shortcode: self.shortcode.clone(),
        }
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub url: String,
    pub shortcode: String,
}

/// The `{url, shortcode}` projection returned by `list_all` and cached as the
/// `all_records` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSummary {
    pub url: String,
    pub shortcode: String,
}
