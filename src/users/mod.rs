// User accounts: registration, profile reads, and partial updates

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{RegisterRequest, UpdateUserRequest, User, UserResponse};
pub use repository::UserRepository;
