//! DTOs for the create, read, update, and delete endpoints.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::application::services::ShortenedUrl;

/// Request body for `POST /shorten` and `PUT /shorten/{code}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlItem {
    /// The long URL (must be an absolute `http` or `https` URL).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    #[validate(custom(function = "validate_http_scheme"))]
    pub url: String,
}

/// Rejects every scheme except `http` and `https`.
///
/// The stored URL is served back as a `Location` header and listed to
/// browsers, so `javascript:`, `data:`, `file:` and the like are refused.
fn validate_http_scheme(url: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(url).map_err(|_| {
        ValidationError::new("invalid_url").with_message("Invalid URL format".into())
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::new("unsupported_scheme")
            .with_message("Only HTTP and HTTPS URLs are allowed".into())),
    }
}

/// Response for create and update.
///
/// `shortened_url` is the long URL the shortcode resolves to.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlResponse {
    pub shortcode: String,
    pub shortened_url: String,
}

impl From<ShortenedUrl> for ShortUrlResponse {
    fn from(value: ShortenedUrl) -> Self {
        Self {
            shortcode: value.shortcode,
            shortened_url: value.shortened_url,
        }
    }
}

/// Query string for `GET /shorten/{code}`.
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(default = "default_true", alias = "update_access_count_value")]
    pub update_access_count: bool,
}

fn default_true() -> bool {
    true
}

/// Response for `DELETE /shorten/{code}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
