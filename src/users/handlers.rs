// HTTP handlers for user endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password::PasswordService;
use crate::error::ApiError;
use crate::reservations::models::Reservation;
use crate::reservations::repository::ReservationRepository;
use crate::users::models::{UpdateUserRequest, User, UserResponse};
use crate::users::repository::UserRepository;
use crate::users::RegisterRequest;
use crate::AppState;

/// Register a new user account
/// POST /api/user/register
#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User successfully created", body = UserResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "users"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.db.clone());

    if repo.email_taken(&request.email, None).await? {
        tracing::warn!("Attempt to register duplicate email: {}", request.email);
        return Err(ApiError::Conflict {
            message: "Email is already in use".to_string(),
        });
    }

    let password_hash = PasswordService::hash_password(&request.password)
        .map_err(|_| ApiError::InternalError("Failed to hash password".to_string()))?;

    // A concurrent registration can still trip the unique index
    let user = repo
        .create(&request.name, &request.email, &password_hash, &request.phone)
        .await
        .map_err(map_duplicate_email)?;

    tracing::info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List all users
/// GET /api/user (requires auth)
pub async fn list_users_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Current user from the token
/// GET /api/user/me
pub async fn me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let me = UserRepository::new(state.db.clone())
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user.user_id))?;

    Ok(Json(UserResponse::from(me)))
}

/// Reservations belonging to the caller
/// GET /api/user/me/reservations
pub async fn me_reservations_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = ReservationRepository::new(state.db.clone())
        .find_by_user(user.user_id)
        .await?;

    Ok(Json(reservations))
}

/// User by id
/// GET /api/user/:id (requires auth)
pub async fn get_user_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(UserResponse::from(user)))
}

/// Partial update of the caller's own account
/// PATCH /api/user/me
pub async fn update_me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = apply_user_update(&state, user.user_id, request).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// Partial update of any user (admin only, gated at the router)
/// PATCH /api/user/:id
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = apply_user_update(&state, id, request).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// Delete a user (admin only, gated at the router)
/// DELETE /api/user/:id
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = UserRepository::new(state.db.clone()).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("User", id));
    }

    tracing::info!("Deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Email unique-index violations become a 409; anything else stays a
/// database error. The app-level checks race with concurrent writers, so
/// both the INSERT and the UPDATE paths route through this.
fn map_duplicate_email(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return ApiError::Conflict {
                message: "Email is already in use".to_string(),
            };
        }
    }
    ApiError::DatabaseError(e)
}

/// Shared partial-update logic
///
/// Runs in a transaction: the existence check, email uniqueness check, and
/// the update either all apply or none do. Omitted fields keep their
/// current values; a new password is re-hashed before storage.
async fn apply_user_update(
    state: &AppState,
    id: i32,
    request: UpdateUserRequest,
) -> Result<User, ApiError> {
    request.validate()?;

    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, phone, role, created_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("User", id))?;

    if let Some(ref new_email) = request.email {
        if !new_email.eq_ignore_ascii_case(&existing.email) {
            let taken: Option<bool> = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users \
                 WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(new_email)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            if taken.unwrap_or(false) {
                tracing::warn!("Attempt to update user {} to taken email", id);
                return Err(ApiError::Conflict {
                    message: "Email is already in use".to_string(),
                });
            }
        }
    }

    let password_hash = match request.password {
        Some(ref password) => PasswordService::hash_password(password)
            .map_err(|_| ApiError::InternalError("Failed to hash password".to_string()))?,
        None => existing.password_hash.clone(),
    };

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users \
         SET name = $1, email = $2, password_hash = $3, phone = $4 \
         WHERE id = $5 \
         RETURNING id, name, email, password_hash, phone, role, created_at",
    )
    .bind(request.name.unwrap_or(existing.name))
    .bind(request.email.unwrap_or(existing.email))
    .bind(password_hash)
    .bind(request.phone.unwrap_or(existing.phone))
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_duplicate_email)?;

    tx.commit().await?;

    tracing::info!("Updated user {}", id);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct DuplicateKey;

    impl fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"users_email_unique\"")
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_email_unique\""
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn unique_violation_on_email_becomes_a_conflict() {
        let err = map_duplicate_email(sqlx::Error::Database(Box::new(DuplicateKey)));
        assert!(matches!(err, ApiError::Conflict { .. }));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn other_database_errors_stay_internal() {
        let err = map_duplicate_email(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::DatabaseError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
