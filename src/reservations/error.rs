// Error types for reservation operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::reservations::models::ReservationStatus;

/// Errors raised while creating or mutating reservations
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Reservation not found")]
    NotFound,

    #[error("Restaurant with id {0} not found")]
    RestaurantNotFound(i32),

    #[error("Table with id {0} not found")]
    TableNotFound(i32),

    #[error("Table does not belong to the requested restaurant")]
    TableMismatch,

    #[error("Party size {party_size} exceeds table capacity {capacity}")]
    PartySizeExceedsCapacity { party_size: i32, capacity: i32 },

    #[error("Table is already reserved for this date and time")]
    SlotTaken,

    #[error("Cannot change reservation status from '{from}' to '{to}'")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("You are not allowed to access this reservation")]
    Forbidden,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for ReservationError {
    fn from(err: sqlx::Error) -> Self {
        ReservationError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReservationError::NotFound
            | ReservationError::RestaurantNotFound(_)
            | ReservationError::TableNotFound(_) => StatusCode::NOT_FOUND,
            ReservationError::TableMismatch
            | ReservationError::PartySizeExceedsCapacity { .. }
            | ReservationError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ReservationError::SlotTaken | ReservationError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            ReservationError::Forbidden => StatusCode::FORBIDDEN,
            ReservationError::DatabaseError(msg) => {
                tracing::error!("Database error in reservations: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            // Internal detail stays in the log
            ReservationError::DatabaseError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_errors_map_to_409() {
        let err = ReservationError::SlotTaken;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let err = ReservationError::InvalidTransition {
            from: ReservationStatus::Cancelled,
            to: ReservationStatus::Confirmed,
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn capacity_errors_are_bad_requests() {
        let err = ReservationError::PartySizeExceedsCapacity {
            party_size: 8,
            capacity: 4,
        };
        assert!(err.to_string().contains("8"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_are_sanitized() {
        let err = ReservationError::DatabaseError("connection refused at 10.0.0.5".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
