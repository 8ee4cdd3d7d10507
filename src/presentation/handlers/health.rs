use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

pub const LIVENESS_MESSAGE: &str = "parley gateway is live";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_MESSAGE)
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}
