//! DTO for the listing endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlSummary;

/// Response for `GET /get_shorten/all`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlListResponse {
    pub urls: Vec<UrlSummary>,
}
