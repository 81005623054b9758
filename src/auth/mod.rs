// Authentication module
// JWT-based login plus the extractors and role guard used by protected routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use middleware::{require_admin, AuthenticatedUser, RequireRole};
pub use models::{LoginRequest, LoginResponse, Role};
pub use password::PasswordService;
pub use token::TokenService;
