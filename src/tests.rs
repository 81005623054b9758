// Router-level tests for the authentication guards. These run against
// small purpose-built routers so no database is needed.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::{middleware, routing::get, Json, Router};
use axum_test::TestServer;
use serde_json::{json, Value};

use crate::auth::middleware::{require_admin, AuthenticatedUser};
use crate::auth::models::Role;
use crate::auth::token::TokenService;

const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");

fn test_token(user_id: i32, email: &str, role: Role) -> String {
    TokenService::new(TEST_SECRET.to_string())
        .generate_access_token(user_id, email, role)
        .unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn whoami(user: AuthenticatedUser) -> Json<Value> {
    Json(json!({ "user_id": user.user_id, "email": user.email }))
}

async fn admin_area() -> &'static str {
    "admin ok"
}

/// Builds a router with one extractor-guarded route and one
/// middleware-guarded admin route
fn guarded_router() -> TestServer {
    std::env::set_var("JWT_SECRET", TEST_SECRET);

    let admin_routes = Router::new()
        .route("/admin", get(admin_area))
        .route_layer(middleware::from_fn(require_admin));

    let app = Router::new().route("/me", get(whoami)).merge(admin_routes);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = guarded_router();

    let response = server.get("/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing authentication token");
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let server = guarded_router();

    let response = server
        .get("/me")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-real-token"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_bearer_prefix_is_rejected() {
    let server = guarded_router();
    let token = test_token(42, "diner@example.com", Role::Customer);

    let response = server
        .get("/me")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&token).unwrap())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_the_handler() {
    let server = guarded_router();
    let token = test_token(42, "diner@example.com", Role::Customer);

    let response = server.get("/me").add_header(AUTHORIZATION, bearer(&token)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user_id"], 42);
    assert_eq!(body["email"], "diner@example.com");
}

#[tokio::test]
async fn test_customer_token_cannot_enter_admin_routes() {
    let server = guarded_router();
    let token = test_token(7, "diner@example.com", Role::Customer);

    let response = server.get("/admin").add_header(AUTHORIZATION, bearer(&token)).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_restaurant_token_cannot_enter_admin_routes() {
    let server = guarded_router();
    let token = test_token(9, "owner@example.com", Role::Restaurant);

    let response = server.get("/admin").add_header(AUTHORIZATION, bearer(&token)).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_token_enters_admin_routes() {
    let server = guarded_router();
    let token = test_token(1, "ops@example.com", Role::Admin);

    let response = server.get("/admin").add_header(AUTHORIZATION, bearer(&token)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "admin ok");
}
