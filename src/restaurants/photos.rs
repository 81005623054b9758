// Restaurant photos (stored as URLs, one optional primary per restaurant)

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

/// Restaurant photo database model
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RestaurantPhoto {
    pub id: i32,
    pub restaurant_id: i32,
    #[schema(example = "https://example.com/restaurant-photo-1.jpg")]
    pub photo_url: String,
    pub is_primary: bool,
}

/// Photo creation DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePhotoRequest {
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Add a photo (platform admin or restaurant admin)
/// POST /api/restaurant/:id/photos
///
/// Marking the new photo primary demotes the previous primary in the same
/// transaction, so at most one photo per restaurant is primary.
pub async fn create_photo_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(restaurant_id): Path<i32>,
    Json(request): Json<CreatePhotoRequest>,
) -> Result<(StatusCode, Json<RestaurantPhoto>), ApiError> {
    request.validate()?;

    if !RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }
    ensure_manages(&state.db, &user, restaurant_id).await?;

    let mut tx = state.db.begin().await?;

    if request.is_primary {
        sqlx::query(
            "UPDATE restaurant_photos SET is_primary = FALSE \
             WHERE restaurant_id = $1 AND is_primary",
        )
        .bind(restaurant_id)
        .execute(&mut *tx)
        .await?;
    }

    let photo = sqlx::query_as::<_, RestaurantPhoto>(
        "INSERT INTO restaurant_photos (restaurant_id, photo_url, is_primary) \
         VALUES ($1, $2, $3) \
         RETURNING id, restaurant_id, photo_url, is_primary",
    )
    .bind(restaurant_id)
    .bind(&request.photo_url)
    .bind(request.is_primary)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Added photo {} to restaurant {}", photo.id, restaurant_id);
    Ok((StatusCode::CREATED, Json(photo)))
}

/// List a restaurant's photos, primary first
/// GET /api/restaurant/:id/photos
pub async fn list_photos_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<RestaurantPhoto>>, ApiError> {
    let repo = RestaurantRepository::new(state.db.clone());

    if !repo.exists(restaurant_id).await? {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    Ok(Json(repo.photos_for(restaurant_id).await?))
}

/// Delete a photo (platform admin or restaurant admin)
/// DELETE /api/photos/:id
pub async fn delete_photo_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let photo = sqlx::query_as::<_, RestaurantPhoto>(
        "SELECT id, restaurant_id, photo_url, is_primary \
         FROM restaurant_photos WHERE id = $1",
    )
    .bind(photo_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Photo", photo_id))?;

    ensure_manages(&state.db, &user, photo.restaurant_id).await?;

    sqlx::query("DELETE FROM restaurant_photos WHERE id = $1")
        .bind(photo_id)
        .execute(&state.db)
        .await?;

    tracing::info!("Deleted photo {}", photo_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn photo_url_must_be_a_url() {
        let request = CreatePhotoRequest {
            photo_url: "not a url".to_string(),
            is_primary: false,
        };
        assert!(request.validate().is_err());

        let request = CreatePhotoRequest {
            photo_url: "https://example.com/photo.jpg".to_string(),
            is_primary: true,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn is_primary_defaults_to_false() {
        let request: CreatePhotoRequest =
            serde_json::from_str(r#"{"photo_url": "https://example.com/a.jpg"}"#).unwrap();
        assert!(!request.is_primary);
    }
}
