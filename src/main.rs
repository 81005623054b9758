mod auth;
mod db;
mod error;
mod pagination;
mod reservations;
mod restaurants;
mod reviews;
mod users;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::middleware::require_admin;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        users::handlers::register_handler,
        restaurants::handlers::create_restaurant_handler,
        restaurants::handlers::list_restaurants_handler,
        reservations::handlers::create_reservation_handler,
    ),
    components(
        schemas(
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            auth::models::Role,
            users::models::RegisterRequest,
            users::models::UserResponse,
            restaurants::models::CreateRestaurantRequest,
            restaurants::models::Restaurant,
            restaurants::models::RestaurantSummary,
            restaurants::models::PriceRange,
            reservations::models::CreateReservationRequest,
            reservations::models::Reservation,
            reservations::models::ReservationStatus,
            pagination::PageMeta,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User account endpoints"),
        (name = "restaurants", description = "Restaurant catalogue endpoints"),
        (name = "reservations", description = "Table reservation endpoints")
    ),
    info(
        title = "SavorSync API",
        version = "1.0.0",
        description = "Restaurant reservation backend: users, restaurants, tables, reservations, reviews"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

/// Creates and configures the application router
///
/// Public routes, authenticated routes (extractor-guarded), and
/// admin-only routes (role middleware) are assembled separately and
/// merged.
pub fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState { db };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Platform-admin routes; the role gate runs before the handlers
    let admin_routes = Router::new()
        .route("/api/restaurant/create", post(restaurants::handlers::create_restaurant_handler))
        .route("/api/restaurant/:id", delete(restaurants::handlers::delete_restaurant_handler))
        .route("/api/restaurant/:id/admins", post(restaurants::admins::link_admin_handler))
        .route("/api/restaurant/:id/admins", get(restaurants::admins::list_admins_handler))
        .route(
            "/api/restaurant/:id/admins/:user_id",
            delete(restaurants::admins::unlink_admin_handler),
        )
        .route("/api/user/:id", patch(users::handlers::update_user_handler))
        .route("/api/user/:id", delete(users::handlers::delete_user_handler))
        .route_layer(middleware::from_fn(require_admin));

    // Everything else; per-handler AuthenticatedUser extractors guard the
    // protected endpoints
    let api_routes = Router::new()
        // Auth
        .route("/api/auth/login", post(auth::handlers::login_handler))
        // Users
        .route("/api/user/register", post(users::handlers::register_handler))
        .route("/api/user", get(users::handlers::list_users_handler))
        .route("/api/user/me", get(users::handlers::me_handler))
        .route("/api/user/me", patch(users::handlers::update_me_handler))
        .route("/api/user/me/reservations", get(users::handlers::me_reservations_handler))
        .route("/api/user/:id", get(users::handlers::get_user_handler))
        // Restaurants
        .route("/api/restaurant", get(restaurants::handlers::list_restaurants_handler))
        .route(
            "/api/restaurant/filters/cuisine-types",
            get(restaurants::handlers::cuisine_types_handler),
        )
        .route("/api/restaurant/:id", get(restaurants::handlers::get_restaurant_handler))
        .route("/api/restaurant/:id", patch(restaurants::handlers::update_restaurant_handler))
        // Tables
        .route("/api/restaurant/:id/tables", post(restaurants::tables::create_table_handler))
        .route("/api/restaurant/:id/tables", get(restaurants::tables::list_tables_handler))
        .route("/api/tables/:id", delete(restaurants::tables::delete_table_handler))
        // Menu
        .route("/api/restaurant/:id/menu", post(restaurants::menu::create_menu_item_handler))
        .route("/api/restaurant/:id/menu", get(restaurants::menu::list_menu_handler))
        .route("/api/menu/:id", patch(restaurants::menu::update_menu_item_handler))
        .route("/api/menu/:id", delete(restaurants::menu::delete_menu_item_handler))
        // Photos
        .route("/api/restaurant/:id/photos", post(restaurants::photos::create_photo_handler))
        .route("/api/restaurant/:id/photos", get(restaurants::photos::list_photos_handler))
        .route("/api/photos/:id", delete(restaurants::photos::delete_photo_handler))
        // Reviews
        .route("/api/restaurant/:id/reviews", post(reviews::handlers::create_review_handler))
        .route("/api/restaurant/:id/reviews", get(reviews::handlers::list_reviews_handler))
        .route("/api/reviews/:id", patch(reviews::handlers::update_review_handler))
        .route("/api/reviews/:id", delete(reviews::handlers::delete_review_handler))
        // Reservations
        .route("/api/reservations", post(reservations::handlers::create_reservation_handler))
        .route("/api/reservations/:id", get(reservations::handlers::get_reservation_handler))
        .route(
            "/api/reservations/:id/status",
            patch(reservations::handlers::update_status_handler),
        )
        .route(
            "/api/reservations/:id",
            delete(reservations::handlers::cancel_reservation_handler),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(admin_routes)
        .merge(api_routes)
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("SavorSync API - Starting...");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    // Fail fast rather than on the first login attempt
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let app = create_router(db_pool);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("SavorSync API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
