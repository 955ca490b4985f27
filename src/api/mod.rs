//! API module
//!
//! HTTP endpoints, middleware and the assembled application router.

pub mod middleware;
pub mod routes;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use routes::{create_router, SharedLedger};

/// Build the full application: health check plus the versioned API.
///
/// A request that hits `request_timeout` gets a 408; a ledger call it already
/// started still runs to completion.
pub fn build_app(ledger: SharedLedger, request_timeout: Duration) -> Router {
    // Axum layers run outermost-last: request id -> logging -> handler
    let api_routes = create_router()
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware));

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/v1", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(ledger)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
