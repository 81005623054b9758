// Reservation business rules

use sqlx::PgPool;

use crate::auth::middleware::AuthenticatedUser;
use crate::reservations::error::ReservationError;
use crate::reservations::models::{CreateReservationRequest, Reservation, ReservationStatus};
use crate::reservations::repository::ReservationRepository;
use crate::restaurants::admins::user_manages_restaurant;
use crate::restaurants::tables::RestaurantTable;

/// Service coordinating reservation operations
///
/// Create enforces: restaurant and table exist, the table belongs to the
/// restaurant, party size fits the table, and the slot is free. Status
/// changes go through the transition rules on ReservationStatus.
#[derive(Clone)]
pub struct ReservationService {
    pool: PgPool,
    repo: ReservationRepository,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        let repo = ReservationRepository::new(pool.clone());
        Self { pool, repo }
    }

    /// Create a pending reservation for the caller
    pub async fn create(
        &self,
        user_id: i32,
        request: &CreateReservationRequest,
    ) -> Result<Reservation, ReservationError> {
        let restaurant_exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(request.restaurant_id)
                .fetch_one(&self.pool)
                .await?;

        let table = sqlx::query_as::<_, RestaurantTable>(
            "SELECT id, restaurant_id, table_number, capacity FROM tables WHERE id = $1",
        )
        .bind(request.table_id)
        .fetch_optional(&self.pool)
        .await?;

        // Only consult the slot when the earlier checks can pass
        let slot_taken = match &table {
            Some(t) if t.restaurant_id == request.restaurant_id => {
                self.repo
                    .slot_taken(
                        request.table_id,
                        request.reservation_date,
                        request.reservation_time,
                    )
                    .await?
            }
            _ => false,
        };

        admit_booking(
            request,
            restaurant_exists.unwrap_or(false),
            table,
            slot_taken,
        )?;

        let reservation = self
            .repo
            .create(
                user_id,
                request.restaurant_id,
                request.table_id,
                request.reservation_date,
                request.reservation_time,
                request.party_size,
            )
            .await?;

        tracing::info!(
            "Created reservation {} for user {} at restaurant {}",
            reservation.id,
            user_id,
            reservation.restaurant_id
        );
        Ok(reservation)
    }

    /// Fetch a reservation, visible to its owner and platform admins
    pub async fn get(
        &self,
        id: i32,
        caller: &AuthenticatedUser,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound)?;

        if reservation.user_id != caller.user_id && !caller.is_admin() {
            return Err(ReservationError::Forbidden);
        }

        Ok(reservation)
    }

    /// Change status; platform admins and the restaurant's admins only
    pub async fn set_status(
        &self,
        id: i32,
        caller: &AuthenticatedUser,
        next: ReservationStatus,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound)?;

        if !user_manages_restaurant(&self.pool, caller, reservation.restaurant_id).await? {
            return Err(ReservationError::Forbidden);
        }

        if !reservation.status.can_transition_to(next) {
            return Err(ReservationError::InvalidTransition {
                from: reservation.status,
                to: next,
            });
        }

        let updated = self.repo.update_status(id, next).await?;
        tracing::info!("Reservation {} moved to status {}", id, next);
        Ok(updated)
    }

    /// Cancel the caller's own reservation; a soft delete that flips the
    /// status instead of removing the row
    pub async fn cancel(
        &self,
        id: i32,
        caller: &AuthenticatedUser,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound)?;

        if reservation.user_id != caller.user_id && !caller.is_admin() {
            return Err(ReservationError::Forbidden);
        }

        if !reservation
            .status
            .can_transition_to(ReservationStatus::Cancelled)
        {
            return Err(ReservationError::InvalidTransition {
                from: reservation.status,
                to: ReservationStatus::Cancelled,
            });
        }

        let cancelled = self
            .repo
            .update_status(id, ReservationStatus::Cancelled)
            .await?;
        tracing::info!("Reservation {} cancelled by user {}", id, caller.user_id);
        Ok(cancelled)
    }
}

/// Admission rules for a booking attempt, checked in order: the restaurant
/// exists, the table exists and belongs to it, the party fits the table,
/// and the slot is free. The caller supplies the looked-up facts.
fn admit_booking(
    request: &CreateReservationRequest,
    restaurant_exists: bool,
    table: Option<RestaurantTable>,
    slot_taken: bool,
) -> Result<RestaurantTable, ReservationError> {
    if !restaurant_exists {
        return Err(ReservationError::RestaurantNotFound(request.restaurant_id));
    }

    let table = table.ok_or(ReservationError::TableNotFound(request.table_id))?;

    if table.restaurant_id != request.restaurant_id {
        return Err(ReservationError::TableMismatch);
    }

    if request.party_size > table.capacity {
        return Err(ReservationError::PartySizeExceedsCapacity {
            party_size: request.party_size,
            capacity: table.capacity,
        });
    }

    if slot_taken {
        tracing::warn!(
            "Reservation conflict on table {} at {} {}",
            request.table_id,
            request.reservation_date,
            request.reservation_time
        );
        return Err(ReservationError::SlotTaken);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn booking(restaurant_id: i32, table_id: i32, party_size: i32) -> CreateReservationRequest {
        CreateReservationRequest {
            restaurant_id,
            table_id,
            reservation_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            party_size,
        }
    }

    fn table(id: i32, restaurant_id: i32, capacity: i32) -> RestaurantTable {
        RestaurantTable {
            id,
            restaurant_id,
            table_number: format!("T{}", id),
            capacity,
        }
    }

    #[test]
    fn booking_at_unknown_restaurant_is_rejected() {
        let result = admit_booking(&booking(99, 1, 2), false, Some(table(1, 99, 4)), false);
        assert!(matches!(result, Err(ReservationError::RestaurantNotFound(99))));
    }

    #[test]
    fn booking_for_unknown_table_is_rejected() {
        let result = admit_booking(&booking(1, 77, 2), true, None, false);
        assert!(matches!(result, Err(ReservationError::TableNotFound(77))));
    }

    #[test]
    fn table_from_another_restaurant_is_rejected() {
        let result = admit_booking(&booking(1, 5, 2), true, Some(table(5, 2, 4)), false);
        assert!(matches!(result, Err(ReservationError::TableMismatch)));
    }

    #[test]
    fn party_larger_than_the_table_is_rejected() {
        let result = admit_booking(&booking(1, 5, 8), true, Some(table(5, 1, 4)), false);
        assert!(matches!(
            result,
            Err(ReservationError::PartySizeExceedsCapacity {
                party_size: 8,
                capacity: 4,
            })
        ));
    }

    #[test]
    fn party_filling_the_table_exactly_is_admitted() {
        let result = admit_booking(&booking(1, 5, 4), true, Some(table(5, 1, 4)), false);
        assert!(result.is_ok());
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let result = admit_booking(&booking(1, 5, 2), true, Some(table(5, 1, 4)), true);
        assert!(matches!(result, Err(ReservationError::SlotTaken)));
    }

    #[test]
    fn valid_booking_returns_the_table() {
        let admitted = admit_booking(&booking(1, 5, 2), true, Some(table(5, 1, 4)), false).unwrap();
        assert_eq!(admitted.id, 5);
        assert_eq!(admitted.restaurant_id, 1);
    }

    #[test]
    fn missing_restaurant_wins_over_missing_table() {
        // Rules apply in order, so the 404 names the restaurant first
        let result = admit_booking(&booking(42, 77, 2), false, None, false);
        assert!(matches!(result, Err(ReservationError::RestaurantNotFound(42))));
    }
}
