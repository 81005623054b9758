// HTTP handlers for review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::restaurants::repository::RestaurantRepository;
use crate::reviews::models::{CreateReviewRequest, Review, UpdateReviewRequest};
use crate::reviews::repository::ReviewRepository;
use crate::AppState;

/// Create a review for a restaurant
/// POST /api/restaurant/:id/reviews
pub async fn create_review_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(restaurant_id): Path<i32>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    request.validate()?;

    if !RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    let repo = ReviewRepository::new(state.db.clone());

    if repo
        .find_by_user_and_restaurant(user.user_id, restaurant_id)
        .await?
        .is_some()
    {
        tracing::warn!(
            "User {} attempted a second review of restaurant {}",
            user.user_id,
            restaurant_id
        );
        return Err(ApiError::Conflict {
            message: "You have already reviewed this restaurant".to_string(),
        });
    }

    let review = repo
        .create(
            user.user_id,
            restaurant_id,
            request.rating,
            request.comment.as_deref(),
        )
        .await
        .map_err(|e| {
            // Unique index backs up the application-level check
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict {
                        message: "You have already reviewed this restaurant".to_string(),
                    };
                }
            }
            ApiError::DatabaseError(e)
        })?;

    tracing::info!("Created review {} for restaurant {}", review.id, restaurant_id);
    Ok((StatusCode::CREATED, Json(review)))
}

/// List a restaurant's reviews, newest first
/// GET /api/restaurant/:id/reviews
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<Review>>, ApiError> {
    if !RestaurantRepository::new(state.db.clone())
        .exists(restaurant_id)
        .await?
    {
        return Err(ApiError::not_found("Restaurant", restaurant_id));
    }

    let reviews = ReviewRepository::new(state.db.clone())
        .find_by_restaurant(restaurant_id)
        .await?;
    Ok(Json(reviews))
}

/// Partial review update (author only)
/// PATCH /api/reviews/:id
pub async fn update_review_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(review_id): Path<i32>,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    request.validate()?;

    let repo = ReviewRepository::new(state.db.clone());

    let existing = repo
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", review_id))?;

    if existing.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "You can only edit your own reviews".to_string(),
        ));
    }

    let rating = request.rating.unwrap_or(existing.rating);
    let comment = request.comment.or(existing.comment);

    let updated = repo.update(review_id, rating, comment.as_deref()).await?;

    tracing::info!("Updated review {}", review_id);
    Ok(Json(updated))
}

/// Delete a review (author or platform admin)
/// DELETE /api/reviews/:id
pub async fn delete_review_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(review_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = ReviewRepository::new(state.db.clone());

    let existing = repo
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", review_id))?;

    if existing.user_id != user.user_id && !user.is_admin() {
        return Err(ApiError::Forbidden(
            "You can only delete your own reviews".to_string(),
        ));
    }

    repo.delete(review_id).await?;

    tracing::info!("Deleted review {}", review_id);
    Ok(StatusCode::NO_CONTENT)
}
