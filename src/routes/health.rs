use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "product-service";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is serving", body = HealthStatus),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::new("OK"))
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Store reachable", body = HealthStatus),
        (status = 503, description = "Store unreachable", body = HealthStatus),
    ),
    tag = "Health"
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::new("OK"))),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::new("UNAVAILABLE")),
            )
        }
    }
}
