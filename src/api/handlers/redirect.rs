//! Handler for short URL redirect.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};

use crate::api::dto::shorten::RedirectQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a shortcode to its long URL.
///
/// # Endpoint
///
/// `GET /shorten/{code}?update_access_count=true`
///
/// # Request Flow
///
/// 1. Increment the access counter (unless `update_access_count=false`)
/// 2. Check the redirect index in the cache
/// 3. On miss, query the store and populate the cache
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the shortcode doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state
        .mapping_service
        .read(&code, query.update_access_count)
        .await?;

    Ok(Redirect::temporary(&long_url))
}
