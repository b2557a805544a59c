//! HTTP handlers for img2video-service.

pub mod img2video;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", example = json!({ "ok": true }))
    ),
    tag = "Observability"
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "ok": true })))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        crate::services::get_metrics(),
    )
}
