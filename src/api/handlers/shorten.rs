//! Handlers for creating, updating, and deleting short URLs.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::shorten::{MessageResponse, ShortUrlResponse, UrlItem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortcode for a long URL, or returns the existing one.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortcode": "100680", "shortened_url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 409 Conflict if the derived shortcode belongs to a different URL.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(payload): Json<UrlItem>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    let created = state.mapping_service.create(&payload.url).await?;

    Ok(Json(created.into()))
}

/// Points an existing shortcode at a new long URL.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 404 Not Found if the shortcode does not exist.
pub async fn update_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UrlItem>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    let updated = state.mapping_service.update(&code, &payload.url).await?;

    Ok(Json(updated.into()))
}

/// Deletes a shortcode.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// Always answers 200 with a confirmation message, whether or not the
/// shortcode existed.
pub async fn delete_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let confirmation = state.mapping_service.delete(&code).await?;

    Ok(Json(MessageResponse {
        message: confirmation.message(),
    }))
}
