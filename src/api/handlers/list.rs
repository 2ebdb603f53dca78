//! Handler for listing every mapping.

use axum::{Json, extract::State};

use crate::api::dto::list::UrlListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every `{url, shortcode}` pair.
///
/// # Endpoint
///
/// `GET /get_shorten/all`
///
/// Served from the cached snapshot when present, otherwise from the store.
pub async fn list_all_handler(
    State(state): State<AppState>,
) -> Result<Json<UrlListResponse>, AppError> {
    let urls = state.mapping_service.list_all().await?;

    Ok(Json(UrlListResponse { urls }))
}
