// HTTP handlers for reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::reservations::error::ReservationError;
use crate::reservations::models::{CreateReservationRequest, Reservation, UpdateStatusRequest};
use crate::reservations::service::ReservationService;
use crate::AppState;

/// Book a table
/// POST /api/reservations
#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid request or party too large for the table"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Restaurant or table not found"),
        (status = 409, description = "Table already reserved for that slot"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reservations"
)]
pub async fn create_reservation_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ReservationError> {
    request
        .validate()
        .map_err(|e| ReservationError::ValidationError(e.to_string()))?;

    let reservation = ReservationService::new(state.db.clone())
        .create(user.user_id, &request)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Fetch one reservation (owner or admin)
/// GET /api/reservations/:id
pub async fn get_reservation_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Reservation>, ReservationError> {
    let reservation = ReservationService::new(state.db.clone())
        .get(id, &user)
        .await?;

    Ok(Json(reservation))
}

/// Change reservation status (platform admin or restaurant admin)
/// PATCH /api/reservations/:id/status
pub async fn update_status_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Reservation>, ReservationError> {
    let reservation = ReservationService::new(state.db.clone())
        .set_status(id, &user, request.status)
        .await?;

    Ok(Json(reservation))
}

/// Cancel a reservation (owner); flips status rather than deleting
/// DELETE /api/reservations/:id
pub async fn cancel_reservation_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Reservation>, ReservationError> {
    let reservation = ReservationService::new(state.db.clone())
        .cancel(id, &user)
        .await?;

    Ok(Json(reservation))
}
