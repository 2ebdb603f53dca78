//! Handler for per-shortcode statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a shortcode, including its access counter.
///
/// # Endpoint
///
/// `GET /shorten/{code}/stats`
///
/// Reads the store directly; does not count as an access.
///
/// # Errors
///
/// Returns 404 Not Found if the shortcode doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.mapping_service.stats(&code).await?;

    Ok(Json(record.into()))
}
