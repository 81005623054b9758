// Restaurant-admin links: which users may manage which restaurants

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::fmt;
use utoipa::ToSchema;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::users::repository::UserRepository;
use crate::AppState;

/// Per-restaurant management role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "admin_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Owner,
    Manager,
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminRole::Owner => write!(f, "owner"),
            AdminRole::Manager => write!(f, "manager"),
        }
    }
}

/// Restaurant-admin link row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RestaurantAdmin {
    pub id: i32,
    pub user_id: i32,
    pub restaurant_id: i32,
    pub role: AdminRole,
}

/// Request body for linking a user as restaurant admin
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkAdminRequest {
    pub user_id: i32,
    pub role: AdminRole,
}

/// Whether the caller may manage this restaurant: platform admins always
/// may, everyone else needs a restaurant_admins link
pub async fn user_manages_restaurant(
    pool: &PgPool,
    user: &AuthenticatedUser,
    restaurant_id: i32,
) -> Result<bool, sqlx::Error> {
    if user.is_admin() {
        return Ok(true);
    }

    let exists: Option<bool> = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM restaurant_admins \
         WHERE user_id = $1 AND restaurant_id = $2)",
    )
    .bind(user.user_id)
    .bind(restaurant_id)
    .fetch_one(pool)
    .await?;

    Ok(exists.unwrap_or(false))
}

/// Status mapping for restaurant-scoped mutations: an unknown restaurant
/// is a 404 for every caller, before the management check can turn it
/// into a 403
pub fn gate_managed(restaurant_id: i32, exists: bool, manages: bool) -> Result<(), ApiError> {
    if !exists {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }
    if manages {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not manage this restaurant".to_string(),
        ))
    }
}

/// Guard form of the management check, mapping refusal to 403. Callers
/// verify the restaurant exists first.
pub async fn ensure_manages(
    pool: &PgPool,
    user: &AuthenticatedUser,
    restaurant_id: i32,
) -> Result<(), ApiError> {
    let manages = user_manages_restaurant(pool, user, restaurant_id).await?;
    gate_managed(restaurant_id, true, manages)
}

/// Link a user to a restaurant as owner or manager (admin only, gated at
/// the router)
/// POST /api/restaurant/:id/admins
pub async fn link_admin_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    Json(request): Json<LinkAdminRequest>,
) -> Result<(StatusCode, Json<RestaurantAdmin>), ApiError> {
    if !crate::restaurants::RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    if UserRepository::new(state.db.clone())
        .find_by_id(request.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("User", request.user_id));
    }

    let link = sqlx::query_as::<_, RestaurantAdmin>(
        "INSERT INTO restaurant_admins (user_id, restaurant_id, role) \
         VALUES ($1, $2, $3) \
         RETURNING id, user_id, restaurant_id, role",
    )
    .bind(request.user_id)
    .bind(restaurant_id)
    .bind(request.role)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return ApiError::Conflict {
                    message: "User is already an admin of this restaurant".to_string(),
                };
            }
        }
        ApiError::DatabaseError(e)
    })?;

    tracing::info!(
        "Linked user {} to restaurant {} as {}",
        link.user_id,
        link.restaurant_id,
        link.role
    );
    Ok((StatusCode::CREATED, Json(link)))
}

/// List admin links for a restaurant (admin only, gated at the router)
/// GET /api/restaurant/:id/admins
pub async fn list_admins_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<RestaurantAdmin>>, ApiError> {
    let links = sqlx::query_as::<_, RestaurantAdmin>(
        "SELECT id, user_id, restaurant_id, role \
         FROM restaurant_admins WHERE restaurant_id = $1 ORDER BY id",
    )
    .bind(restaurant_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(links))
}

/// Remove an admin link (admin only, gated at the router)
/// DELETE /api/restaurant/:id/admins/:user_id
pub async fn unlink_admin_handler(
    State(state): State<AppState>,
    Path((restaurant_id, user_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query(
        "DELETE FROM restaurant_admins WHERE restaurant_id = $1 AND user_id = $2",
    )
    .bind(restaurant_id)
    .bind(user_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("RestaurantAdmin", user_id));
    }

    tracing::info!("Unlinked user {} from restaurant {}", user_id, restaurant_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_restaurant_is_not_found_even_without_a_link() {
        let err = gate_managed(42, false, false).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_restaurant_is_not_found_even_for_a_manager() {
        // The 404 wins regardless of what the link table says
        let err = gate_managed(42, false, true).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn known_restaurant_without_a_link_is_forbidden() {
        let err = gate_managed(42, true, false).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn manager_of_a_known_restaurant_passes() {
        assert!(gate_managed(42, true, true).is_ok());
    }
}
