//! CORS middleware.
//!
//! The API is read-only and consumed by a separately hosted frontend, so
//! any origin may issue GET requests.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Create the CORS layer for the read-only API.
pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}
