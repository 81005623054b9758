// Menu items owned by a restaurant

use axum::{
    extract::{Path, Query, State},
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

/// Menu item database model; price is stored in cents
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MenuItem {
    pub id: i32,
    pub restaurant_id: i32,
    #[schema(example = "Margherita")]
    pub name: String,
    pub description: String,
    /// Price in cents
    #[schema(example = 1250)]
    pub price_cents: i32,
    #[schema(example = "Main Course")]
    pub category: String,
}

/// Menu item creation DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price_cents: i32,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
}

/// Partial menu item update DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price_cents: Option<i32>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
}

/// Optional category filter for the listing
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Create a menu item (platform admin or restaurant admin)
/// POST /api/restaurant/:id/menu
pub async fn create_menu_item_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(restaurant_id): Path<i32>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    request.validate()?;

    if !RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }
    ensure_manages(&state.db, &user, restaurant_id).await?;

    let item = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (restaurant_id, name, description, price_cents, category) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, restaurant_id, name, description, price_cents, category",
    )
    .bind(restaurant_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.price_cents)
    .bind(&request.category)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Created menu item {} for restaurant {}", item.id, restaurant_id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// List a restaurant's menu, optionally filtered by category
/// GET /api/restaurant/:id/menu?category=
pub async fn list_menu_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let repo = RestaurantRepository::new(state.db.clone());

    if !repo.exists(restaurant_id).await? {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    let items = repo
        .menu_for(restaurant_id, query.category.as_deref())
        .await?;
    Ok(Json(items))
}

/// Partial menu item update (platform admin or restaurant admin)
/// PATCH /api/menu/:id
pub async fn update_menu_item_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<i32>,
    Json(request): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItem>, ApiError> {
    request.validate()?;

    let existing = sqlx::query_as::<_, MenuItem>(
        "SELECT id, restaurant_id, name, description, price_cents, category \
         FROM menu_items WHERE id = $1",
    )
    .bind(item_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("MenuItem", item_id))?;

    ensure_manages(&state.db, &user, existing.restaurant_id).await?;

    let updated = sqlx::query_as::<_, MenuItem>(
        "UPDATE menu_items \
         SET name = $1, description = $2, price_cents = $3, category = $4 \
         WHERE id = $5 \
         RETURNING id, restaurant_id, name, description, price_cents, category",
    )
    .bind(request.name.unwrap_or(existing.name))
    .bind(request.description.unwrap_or(existing.description))
    .bind(request.price_cents.unwrap_or(existing.price_cents))
    .bind(request.category.unwrap_or(existing.category))
    .bind(item_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Updated menu item {}", item_id);
    Ok(Json(updated))
}

/// Delete a menu item (platform admin or restaurant admin)
/// DELETE /api/menu/:id
pub async fn delete_menu_item_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let existing = sqlx::query_as::<_, MenuItem>(
        "SELECT id, restaurant_id, name, description, price_cents, category \
         FROM menu_items WHERE id = $1",
    )
    .bind(item_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("MenuItem", item_id))?;

    ensure_manages(&state.db, &user, existing.restaurant_id).await?;

    sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(item_id)
        .execute(&state.db)
        .await?;

    tracing::info!("Deleted menu item {}", item_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn zero_or_negative_prices_are_rejected() {
        let request = CreateMenuItemRequest {
            name: "Margherita".to_string(),
            description: String::new(),
            price_cents: 0,
            category: "Main Course".to_string(),
        };
        assert!(request.validate().is_err());

        let request = CreateMenuItemRequest {
            price_cents: -100,
            ..request
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn description_defaults_to_empty() {
        let request: CreateMenuItemRequest = serde_json::from_str(
            r#"{"name": "Tiramisu", "price_cents": 850, "category": "Dessert"}"#,
        )
        .unwrap();
        assert_eq!(request.description, "");
        assert!(request.validate().is_ok());
    }
}
