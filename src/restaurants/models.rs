// Restaurant data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::restaurants::menu::MenuItem;
use crate::restaurants::photos::RestaurantPhoto;
use crate::restaurants::tables::RestaurantTable;

/// Price tier category, from cheapest ("one") to most expensive ("four")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "price_range", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    One,
    Two,
    Three,
    Four,
}

/// Restaurant database model
///
/// opening_hours is a JSONB map of lowercase weekday to an "open-close"
/// range like "9:00-22:00".
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine_type: String,
    pub price_range: PriceRange,
    #[schema(value_type = Object)]
    pub opening_hours: Json<HashMap<String, String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Compact projection used by the paginated listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub price_range: PriceRange,
    pub cuisine_type: String,
}

/// Full detail view: the restaurant plus its owned entities and review
/// aggregates
#[derive(Debug, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub tables: Vec<RestaurantTable>,
    pub menu_items: Vec<MenuItem>,
    pub photos: Vec<RestaurantPhoto>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

/// Restaurant creation DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(example = "Trattoria Bella")]
    pub name: String,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "Address must not be empty"))]
    #[schema(example = "123 Main Street, New York, NY")]
    pub address: String,
    #[validate(length(min = 1, message = "Cuisine type must not be empty"))]
    #[schema(example = "Italian")]
    pub cuisine_type: String,
    pub price_range: PriceRange,
    #[validate(custom = "crate::validation::validate_opening_hours")]
    #[serde(default)]
    #[schema(value_type = Object)]
    pub opening_hours: HashMap<String, String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Partial restaurant update DTO; omitted fields keep current values
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRestaurantRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Address must not be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "Cuisine type must not be empty"))]
    pub cuisine_type: Option<String>,
    pub price_range: Option<PriceRange>,
    #[validate(custom = "crate::validation::validate_opening_hours")]
    #[schema(value_type = Object)]
    pub opening_hours: Option<HashMap<String, String>>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_create() -> CreateRestaurantRequest {
        let mut opening_hours = HashMap::new();
        opening_hours.insert("monday".to_string(), "9:00-22:00".to_string());

        CreateRestaurantRequest {
            name: "Trattoria Bella".to_string(),
            description: "Best pizza in town since 1990".to_string(),
            address: "123 Main Street".to_string(),
            cuisine_type: "Italian".to_string(),
            price_range: PriceRange::Two,
            opening_hours,
            latitude: Some(40.7128),
            longitude: Some(-74.006),
        }
    }

    #[test]
    fn valid_creation_request_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut bad = valid_create();
        bad.latitude = Some(91.0);
        assert!(bad.validate().is_err());

        let mut bad = valid_create();
        bad.longitude = Some(-181.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn malformed_opening_hours_are_rejected() {
        let mut bad = valid_create();
        bad.opening_hours
            .insert("monday".to_string(), "whenever".to_string());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn price_range_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PriceRange::Three).unwrap(), "\"three\"");
        let parsed: PriceRange = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(parsed, PriceRange::One);
    }

    #[test]
    fn coordinates_are_optional() {
        let mut req = valid_create();
        req.latitude = None;
        req.longitude = None;
        assert!(req.validate().is_ok());
    }
}
