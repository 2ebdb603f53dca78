//! Cross-origin resource sharing middleware.

use tower_http::cors::{Any, CorsLayer};

/// Allows any origin, method, and header.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
