use axum::{
    Json,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use serde_json::json;

use super::error_responses::ErrorResponse;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    ErrorResponse::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
