// Database repository for review rows

use sqlx::PgPool;

use crate::reviews::models::Review;

const REVIEW_COLUMNS: &str = "id, user_id, restaurant_id, rating, comment, created_at";

/// Review repository for database operations
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i32,
        restaurant_id: i32,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (user_id, restaurant_id, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(user_id)
        .bind(restaurant_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// One review per user per restaurant, used for duplicate detection
    pub async fn find_by_user_and_restaurant(
        &self,
        user_id: i32,
        restaurant_id: i32,
    ) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE user_id = $1 AND restaurant_id = $2"
        ))
        .bind(user_id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Reviews for a restaurant, newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE restaurant_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "UPDATE reviews SET rating = $1, comment = $2 WHERE id = $3 \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(rating)
        .bind(comment)
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
