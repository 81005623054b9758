// Dining tables owned by a restaurant

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::restaurants::admins::ensure_manages;
use crate::restaurants::repository::RestaurantRepository;
use crate::AppState;

/// Dining table database model
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RestaurantTable {
    pub id: i32,
    pub restaurant_id: i32,
    #[schema(example = "T1")]
    pub table_number: String,
    #[schema(example = 4)]
    pub capacity: i32,
}

/// Table creation DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTableRequest {
    #[validate(length(min = 1, message = "Table number must not be empty"))]
    pub table_number: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

/// Create a table (platform admin or restaurant admin)
/// POST /api/restaurant/:id/tables
pub async fn create_table_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(restaurant_id): Path<i32>,
    Json(request): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<RestaurantTable>), ApiError> {
    request.validate()?;

    if !RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }
    ensure_manages(&state.db, &user, restaurant_id).await?;

    let table = sqlx::query_as::<_, RestaurantTable>(
        "INSERT INTO tables (restaurant_id, table_number, capacity) \
         VALUES ($1, $2, $3) \
         RETURNING id, restaurant_id, table_number, capacity",
    )
    .bind(restaurant_id)
    .bind(&request.table_number)
    .bind(request.capacity)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        // (restaurant_id, table_number) is unique
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return ApiError::Conflict {
                    message: format!(
                        "Table '{}' already exists for this restaurant",
                        request.table_number
                    ),
                };
            }
        }
        ApiError::DatabaseError(e)
    })?;

    tracing::info!("Created table {} for restaurant {}", table.id, restaurant_id);
    Ok((StatusCode::CREATED, Json(table)))
}

/// List a restaurant's tables
/// GET /api/restaurant/:id/tables
pub async fn list_tables_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<RestaurantTable>>, ApiError> {
    let repo = RestaurantRepository::new(state.db.clone());

    if !repo.exists(restaurant_id).await? {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    Ok(Json(repo.tables_for(restaurant_id).await?))
}

/// Delete a table (platform admin or restaurant admin)
/// DELETE /api/tables/:id
pub async fn delete_table_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(table_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let table = sqlx::query_as::<_, RestaurantTable>(
        "SELECT id, restaurant_id, table_number, capacity FROM tables WHERE id = $1",
    )
    .bind(table_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Table", table_id))?;

    ensure_manages(&state.db, &user, table.restaurant_id).await?;

    sqlx::query("DELETE FROM tables WHERE id = $1")
        .bind(table_id)
        .execute(&state.db)
        .await?;

    tracing::info!("Deleted table {}", table_id);
    Ok(StatusCode::NO_CONTENT)
}
