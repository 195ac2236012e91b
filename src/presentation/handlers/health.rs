use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness only; never touches Azure.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
