use crate::api::schemas::health::HealthResponse;
use axum::{Json, response::IntoResponse};
use time::OffsetDateTime;

/// Liveness endpoint: answers as long as the process is serving requests.
/// Deliberately does not touch the database.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok", timestamp: OffsetDateTime::now_utc() })
}
