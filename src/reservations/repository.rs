// Database repository for reservation rows

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::reservations::models::{Reservation, ReservationStatus};

const RESERVATION_COLUMNS: &str = "id, user_id, restaurant_id, table_id, reservation_date, \
                                   reservation_time, party_size, status, created_at";

/// Reservation repository for database operations
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i32,
        restaurant_id: i32,
        table_id: i32,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations \
             (user_id, restaurant_id, table_id, reservation_date, reservation_time, party_size) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(restaurant_id)
        .bind(table_id)
        .bind(date)
        .bind(time)
        .bind(party_size)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All reservations belonging to one user, soonest first
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE user_id = $1 \
             ORDER BY reservation_date, reservation_time"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Whether a non-cancelled reservation already holds this table at
    /// this date and time
    pub async fn slot_taken(
        &self,
        table_id: i32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reservations \
             WHERE table_id = $1 AND reservation_date = $2 AND reservation_time = $3 \
               AND status != 'cancelled')",
        )
        .bind(table_id)
        .bind(date)
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.unwrap_or(false))
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: ReservationStatus,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET status = $1 WHERE id = $2 \
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }
}
