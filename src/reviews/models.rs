// Review data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Review database model
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub restaurant_id: i32,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a review
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(max = 1000, message = "Comment must not exceed 1000 characters"))]
    pub comment: Option<String>,
}

/// Request DTO for updating an existing review
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    #[validate(length(max = 1000, message = "Comment must not exceed 1000 characters"))]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        for bad in [0i16, 6, -1] {
            let request = CreateReviewRequest {
                rating: bad,
                comment: None,
            };
            assert!(request.validate().is_err(), "rating {} should fail", bad);
        }

        let request = CreateReviewRequest {
            rating: 3,
            comment: Some("Great food".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn overlong_comments_are_rejected() {
        let request = CreateReviewRequest {
            rating: 4,
            comment: Some("x".repeat(1001)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn comment_is_optional() {
        let request: CreateReviewRequest = serde_json::from_str(r#"{"rating": 5}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.comment.is_none());
    }
}
