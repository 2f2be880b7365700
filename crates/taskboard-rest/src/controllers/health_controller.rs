//! Health check controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use serde::{Deserialize, Serialize};
use taskboard_core::{HealthStatus, TaskboardError};
use tracing::warn;
use utoipa::ToSchema;

/// Message returned when the database cannot be reached.
pub const DATABASE_UNAVAILABLE: &str = "PostgreSQL connection failed";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz/", get(health_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint. Verifies the database answers a trivial query.
#[utoipa::path(
    get,
    path = "/healthz/",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 400, description = "PostgreSQL connection failed")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    match state.database.check().await {
        HealthStatus::Healthy => ok(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
        HealthStatus::Unhealthy(reason) => {
            warn!("Health check '{}' failed: {}", state.database.name(), reason);
            Err(TaskboardError::invalid_input(DATABASE_UNAVAILABLE).into())
        }
    }
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
