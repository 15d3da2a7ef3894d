use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::usecases::errors::RestaurantError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for RestaurantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            // Storage detail stays in the logs.
            RestaurantError::Persistence(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorResponse::new(status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_errors_do_not_leak_detail() {
        let response =
            RestaurantError::Persistence(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn business_errors_keep_their_status() {
        assert_eq!(
            RestaurantError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            RestaurantError::NoCapacity.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestaurantError::NotFound("dish").into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
