//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /shorten`              - Shorten a URL
//! - `GET    /shorten/{code}`       - Redirect to the long URL
//! - `PUT    /shorten/{code}`       - Point a shortcode at a new URL
//! - `DELETE /shorten/{code}`       - Delete a shortcode
//! - `GET    /shorten/{code}/stats` - Stored record with access counter
//! - `GET    /get_shorten/all`      - List every `{url, shortcode}` pair
//! - `GET    /health`               - Store and cache health
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, for browser frontends on another host
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
