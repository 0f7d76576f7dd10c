//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::http::health::health_check;
use crate::state::AppState;
use crate::webhook::handle_github_webhook;

/// Build the router.
///
/// ```text
/// POST /{callback_path}  - GitHub webhook deliveries
/// GET  /health           - Health check
/// ```
///
/// `callback_path` is the route path, leading slash included.
pub fn create_router(state: Arc<AppState>, callback_path: &str) -> Router {
    Router::new()
        .route(callback_path, post(handle_github_webhook))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
