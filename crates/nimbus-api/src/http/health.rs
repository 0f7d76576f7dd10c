//! Health check handler.

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub organization: String,
    pub repository: String,
    pub uptime_secs: u64,
    pub deliveries: u64,
}

/// Health check.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let context = state.workflow.context();
    Json(HealthResponse {
        status: "ok",
        organization: context.organization.login.clone(),
        repository: context.repository.full_name.clone(),
        uptime_secs: state.uptime().as_secs(),
        deliveries: state.delivery_count(),
    })
}
