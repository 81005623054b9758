// Database repository for restaurant rows and their detail pieces

use sqlx::types::Json;
use sqlx::PgPool;

use crate::restaurants::menu::MenuItem;
use crate::restaurants::models::{CreateRestaurantRequest, Restaurant, RestaurantSummary};
use crate::restaurants::photos::RestaurantPhoto;
use crate::restaurants::tables::RestaurantTable;

const RESTAURANT_COLUMNS: &str = "id, name, description, address, cuisine_type, price_range, \
                                  opening_hours, latitude, longitude, created_at";

/// Restaurant repository for database operations
#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await
    }

    /// One page of the summary listing, newest restaurants first
    pub async fn find_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RestaurantSummary>, sqlx::Error> {
        sqlx::query_as::<_, RestaurantSummary>(
            "SELECT id, name, address, price_range, cuisine_type \
             FROM restaurants \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Distinct cuisine types across all restaurants, for filter menus
    pub async fn cuisine_types(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT cuisine_type FROM restaurants ORDER BY cuisine_type")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    pub async fn create(
        &self,
        request: &CreateRestaurantRequest,
    ) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "INSERT INTO restaurants \
             (name, description, address, cuisine_type, price_range, opening_hours, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.address)
        .bind(&request.cuisine_type)
        .bind(request.price_range)
        .bind(Json(&request.opening_hours))
        .bind(request.latitude)
        .bind(request.longitude)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn tables_for(&self, restaurant_id: i32) -> Result<Vec<RestaurantTable>, sqlx::Error> {
        sqlx::query_as::<_, RestaurantTable>(
            "SELECT id, restaurant_id, table_number, capacity \
             FROM tables WHERE restaurant_id = $1 ORDER BY table_number",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn menu_for(
        &self,
        restaurant_id: i32,
        category: Option<&str>,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "SELECT id, restaurant_id, name, description, price_cents, category \
             FROM menu_items \
             WHERE restaurant_id = $1 AND ($2::text IS NULL OR category = $2) \
             ORDER BY category, name",
        )
        .bind(restaurant_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn photos_for(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPhoto>, sqlx::Error> {
        sqlx::query_as::<_, RestaurantPhoto>(
            "SELECT id, restaurant_id, photo_url, is_primary \
             FROM restaurant_photos \
             WHERE restaurant_id = $1 \
             ORDER BY is_primary DESC, id",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Review aggregates: average rating (None when unreviewed) and count
    pub async fn rating_for(&self, restaurant_id: i32) -> Result<(Option<f64>, i64), sqlx::Error> {
        let row: (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(rating)::float8, COUNT(*) FROM reviews WHERE restaurant_id = $1",
        )
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
