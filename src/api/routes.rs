//! API route configuration.

use crate::api::handlers::{
    create_handler, delete_handler, health_handler, list_all_handler, redirect_handler,
    stats_handler, update_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST   /shorten`              - Create (or reuse) a shortcode for a URL
/// - `GET    /shorten/{code}`       - Redirect; `?update_access_count=false` skips counting
/// - `PUT    /shorten/{code}`       - Update the long URL behind a shortcode
/// - `DELETE /shorten/{code}`       - Delete a shortcode
/// - `GET    /shorten/{code}/stats` - Access counter and timestamps
/// - `GET    /get_shorten/all`      - List all mappings
/// - `GET    /health`               - Health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(create_handler))
        .route(
            "/shorten/{code}",
            get(redirect_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .route("/shorten/{code}/stats", get(stats_handler))
        .route("/get_shorten/all", get(list_all_handler))
        .route("/health", get(health_handler))
}
