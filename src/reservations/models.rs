// Reservation data models and DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// Reservation lifecycle status (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Allowed transitions: pending may be confirmed or cancelled, a
    /// confirmed reservation may still be cancelled, cancelled is final
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pending"),
            ReservationStatus::Confirmed => write!(f, "confirmed"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Reservation database model; contains nothing sensitive, so it doubles
/// as the response body
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub restaurant_id: i32,
    pub table_id: i32,
    #[schema(value_type = String, example = "2026-09-01")]
    pub reservation_date: NaiveDate,
    #[schema(value_type = String, example = "19:30:00")]
    pub reservation_time: NaiveTime,
    pub party_size: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Reservation creation DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub restaurant_id: i32,
    pub table_id: i32,
    #[schema(value_type = String, example = "2026-09-01")]
    pub reservation_date: NaiveDate,
    #[schema(value_type = String, example = "19:30:00")]
    pub reservation_time: NaiveTime,
    #[validate(range(min = 1, max = 50, message = "Party size must be between 1 and 50"))]
    pub party_size: i32,
}

/// Status change DTO for PATCH /api/reservations/:id/status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn pending_can_be_confirmed_or_cancelled() {
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Cancelled));
    }

    #[test]
    fn confirmed_can_only_be_cancelled() {
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Pending));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Confirmed));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Cancelled));
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        let parsed: ReservationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Cancelled);
    }

    #[test]
    fn creation_request_parses_date_and_time() {
        let request: CreateReservationRequest = serde_json::from_str(
            r#"{
                "restaurant_id": 1,
                "table_id": 2,
                "reservation_date": "2026-09-01",
                "reservation_time": "19:30:00",
                "party_size": 4
            }"#,
        )
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.reservation_date.to_string(), "2026-09-01");
        assert_eq!(request.reservation_time.to_string(), "19:30:00");
    }

    #[test]
    fn party_size_bounds_are_enforced() {
        let mut request: CreateReservationRequest = serde_json::from_str(
            r#"{
                "restaurant_id": 1,
                "table_id": 2,
                "reservation_date": "2026-09-01",
                "reservation_time": "19:30:00",
                "party_size": 0
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_err());

        request.party_size = 51;
        assert!(request.validate().is_err());
    }
}
