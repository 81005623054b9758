// Restaurants and their owned sub-resources: tables, menu items, photos,
// and restaurant-admin links

pub mod admins;
pub mod handlers;
pub mod menu;
pub mod models;
pub mod photos;
pub mod repository;
pub mod tables;

pub use models::{CreateRestaurantRequest, PriceRange, Restaurant, RestaurantSummary, UpdateRestaurantRequest};
pub use repository::RestaurantRepository;
