// HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, LoginResponse},
    password::PasswordService,
    token::TokenService,
};
use crate::users::models::UserResponse;
use crate::users::repository::UserRepository;
use crate::AppState;

/// Authenticate a user and return a signed access token
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User successfully authenticated", body = LoginResponse),
        (status = 400, description = "Invalid request data"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let repo = UserRepository::new(state.db.clone());

    // Unknown email and wrong password produce the same 401
    let user = repo
        .find_by_email(&request.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !PasswordService::verify_password(&request.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AuthError::ConfigError("JWT_SECRET not configured".to_string()))?;
    let access_token =
        TokenService::new(secret).generate_access_token(user.id, &user.email, user.role)?;

    tracing::info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        access_token,
        user: UserResponse::from(user),
    }))
}
