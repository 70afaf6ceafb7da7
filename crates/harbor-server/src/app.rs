//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::get_health))
        .route("/api/related", get(handlers::related::get_related))
        .route(
            "/api/structure",
            get(handlers::structure::get_root_structure),
        )
        .route(
            "/api/structure/",
            get(handlers::structure::get_root_structure),
        )
        .route(
            "/api/structure/{*path}",
            get(handlers::structure::get_structure),
        );

    Router::new().merge(api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors::cors_layer()),
    ).with_state(state)
}
