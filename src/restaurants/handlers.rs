// HTTP handlers for restaurant endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::types::Json as SqlJson;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::pagination::{Paginated, PaginationParams};
use crate::restaurants::admins::{gate_managed, user_manages_restaurant};
use crate::restaurants::models::{
    CreateRestaurantRequest, Restaurant, RestaurantDetail, RestaurantSummary,
    UpdateRestaurantRequest,
};
use crate::restaurants::repository::RestaurantRepository;
use crate::AppState;

/// Create a new restaurant (admin only, gated at the router)
/// POST /api/restaurant/create
#[utoipa::path(
    post,
    path = "/api/restaurant/create",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant successfully created", body = Restaurant),
        (status = 400, description = "Invalid request data"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "restaurants"
)]
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    request.validate()?;

    let restaurant = RestaurantRepository::new(state.db.clone())
        .create(&request)
        .await?;

    tracing::info!("Created restaurant {}", restaurant.id);
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// Paginated restaurant listing, newest first
/// GET /api/restaurant?page=&limit=
#[utoipa::path(
    get,
    path = "/api/restaurant",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of restaurants"),
        (status = 500, description = "Internal server error")
    ),
    tag = "restaurants"
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<RestaurantSummary>>, ApiError> {
    let (page, limit) = params.normalize();
    let repo = RestaurantRepository::new(state.db.clone());

    let total = repo.count().await?;
    let data = repo.find_page(i64::from(limit), params.offset()).await?;

    tracing::debug!("Restaurant listing page {} returned {} rows", page, data.len());
    Ok(Json(Paginated::new(data, total, page, limit)))
}

/// Distinct cuisine types for filter UIs
/// GET /api/restaurant/filters/cuisine-types
pub async fn cuisine_types_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cuisine_types = RestaurantRepository::new(state.db.clone())
        .cuisine_types()
        .await?;

    Ok(Json(json!({ "cuisineTypes": cuisine_types })))
}

/// Full restaurant detail: tables, menu, photos, and review aggregates
/// GET /api/restaurant/:id
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let repo = RestaurantRepository::new(state.db.clone());

    let restaurant = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant", id))?;

    let tables = repo.tables_for(id).await?;
    let menu_items = repo.menu_for(id, None).await?;
    let photos = repo.photos_for(id).await?;
    let (average_rating, review_count) = repo.rating_for(id).await?;

    Ok(Json(RestaurantDetail {
        restaurant,
        tables,
        menu_items,
        photos,
        average_rating,
        review_count,
    }))
}

/// Partial restaurant update (platform admin or restaurant admin)
/// PATCH /api/restaurant/:id
pub async fn update_restaurant_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> Result<Json<Restaurant>, ApiError> {
    request.validate()?;

    let repo = RestaurantRepository::new(state.db.clone());
    let exists = repo.exists(id).await?;
    let manages = user_manages_restaurant(&state.db, &user, id).await?;
    gate_managed(id, exists, manages)?;

    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, description, address, cuisine_type, price_range, \
                opening_hours, latitude, longitude, created_at \
         FROM restaurants WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("Restaurant", id))?;

    let opening_hours = match request.opening_hours {
        Some(hours) => SqlJson(hours),
        None => existing.opening_hours,
    };

    let updated = sqlx::query_as::<_, Restaurant>(
        "UPDATE restaurants \
         SET name = $1, description = $2, address = $3, cuisine_type = $4, \
             price_range = $5, opening_hours = $6, latitude = $7, longitude = $8 \
         WHERE id = $9 \
         RETURNING id, name, description, address, cuisine_type, price_range, \
                   opening_hours, latitude, longitude, created_at",
    )
    .bind(request.name.unwrap_or(existing.name))
    .bind(request.description.unwrap_or(existing.description))
    .bind(request.address.unwrap_or(existing.address))
    .bind(request.cuisine_type.unwrap_or(existing.cuisine_type))
    .bind(request.price_range.unwrap_or(existing.price_range))
    .bind(opening_hours)
    .bind(request.latitude.or(existing.latitude))
    .bind(request.longitude.or(existing.longitude))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Updated restaurant {}", id);
    Ok(Json(updated))
}

/// Delete a restaurant (admin only, gated at the router)
/// DELETE /api/restaurant/:id
pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = RestaurantRepository::new(state.db.clone()).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Restaurant", id));
    }

    tracing::info!("Deleted restaurant {}", id);
    Ok(StatusCode::NO_CONTENT)
}
