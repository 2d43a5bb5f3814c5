use axum::{
    Json, Router,
    http::StatusCode,
    routing::get,
};

use crate::{response::ApiResponse, state::AppState};

pub mod doc;
pub mod health;
pub mod params;
pub mod products;

/// Build the application router with its state. Middleware is layered on by
/// the binary.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/products", products::router())
        // Older callers address the service under `/api`.
        .nest("/api/products", products::router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure("Route not found", None)),
    )
}
