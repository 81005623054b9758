// Restaurant reviews: one rating+comment per user per restaurant

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{CreateReviewRequest, Review, UpdateReviewRequest};
pub use repository::ReviewRepository;
