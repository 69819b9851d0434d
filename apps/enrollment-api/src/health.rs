//! Health and readiness endpoints.

use axum::{http::StatusCode, Extension, Json};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health — liveness probe, always healthy while the process runs.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /readyz — readiness probe, verifies the database is reachable.
pub async fn readyz_handler(
    Extension(pool): Extension<PgPool>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => Ok(Json(HealthResponse {
            status: "ready",
            version: env!("CARGO_PKG_VERSION"),
        })),
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
