use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid date or time: {0}")]
    InvalidDateTime(String),
    #[error("no table is available at this branch")]
    NoCapacity,
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("cash on delivery is not available for orders above the ceiling")]
    PaymentMethodRestricted,
    #[error("already paid")]
    AlreadyPaid,
    #[error("forbidden")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

impl RestaurantError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestaurantError::Validation(_)
            | RestaurantError::InvalidDateTime(_)
            | RestaurantError::NoCapacity
            | RestaurantError::InvalidState(_)
            | RestaurantError::PaymentMethodRestricted
            | RestaurantError::AlreadyPaid => StatusCode::BAD_REQUEST,
            RestaurantError::Forbidden => StatusCode::FORBIDDEN,
            RestaurantError::NotFound(_) => StatusCode::NOT_FOUND,
            RestaurantError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wraps a domain validator failure.
    pub fn validation(err: anyhow::Error) -> Self {
        RestaurantError::Validation(err.to_string())
    }
}

pub type UseCaseResult<T> = std::result::Result<T, RestaurantError>;

/// Logs a storage failure under `context` and turns it into `Persistence`.
pub(crate) fn storage_failure(context: &'static str) -> impl FnOnce(anyhow::Error) -> RestaurantError {
    move |err| {
        error!(db_error = ?err, "{}", context);
        RestaurantError::Persistence(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rejections_map_to_bad_request() {
        for err in [
            RestaurantError::Validation("x".to_string()),
            RestaurantError::InvalidDateTime("x".to_string()),
            RestaurantError::NoCapacity,
            RestaurantError::InvalidState("x".to_string()),
            RestaurantError::PaymentMethodRestricted,
            RestaurantError::AlreadyPaid,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn ownership_missing_and_storage_errors_have_their_own_codes() {
        assert_eq!(RestaurantError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(RestaurantError::NotFound("order").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RestaurantError::Persistence(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(RestaurantError::NotFound("order").to_string(), "order not found");
    }

    #[test]
    fn bad_reservation_times_keep_their_own_message() {
        let err = RestaurantError::InvalidDateTime("reservation time must be in the future".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "invalid date or time: reservation time must be in the future"
        );
    }
}
