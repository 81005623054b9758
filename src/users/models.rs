// User data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::Role;

/// User database model
///
/// Deliberately not Serialize: password_hash must never reach a response
/// body. Read paths go through UserResponse.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "+14155550123")]
    pub phone: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(custom = "crate::validation::validate_phone")]
    pub phone: String,
}

/// Partial update request DTO; omitted fields keep their current values
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(custom = "crate::validation::validate_phone")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_registration() -> RegisterRequest {
        RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            phone: "+14155550123".to_string(),
        }
    }

    #[test]
    fn user_response_never_contains_the_password_hash() {
        let user = User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
            phone: "+14155550123".to_string(),
            role: Role::Customer,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"email\":\"john@example.com\""));
        assert!(json.contains("\"role\":\"customer\""));
    }

    #[test]
    fn registration_validates_all_fields() {
        assert!(valid_registration().validate().is_ok());

        let mut bad = valid_registration();
        bad.email = "not-an-email".to_string();
        assert!(bad.validate().is_err());

        let mut bad = valid_registration();
        bad.password = "short".to_string();
        assert!(bad.validate().is_err());

        let mut bad = valid_registration();
        bad.phone = "555-CALL-NOW".to_string();
        assert!(bad.validate().is_err());

        let mut bad = valid_registration();
        bad.name = String::new();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn partial_update_with_no_fields_is_valid() {
        let update: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(update.validate().is_ok());
        assert!(update.name.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn partial_update_still_validates_present_fields() {
        let update: UpdateUserRequest =
            serde_json::from_str(r#"{"email": "broken@"}"#).unwrap();
        assert!(update.validate().is_err());
    }
}
