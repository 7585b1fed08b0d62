//! Guest-facing booking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingDetails, BookingStatus, CreateBookingRequest},
};

use super::AuthenticatedUser;

/// Response for a created booking
#[derive(Serialize, ToSchema)]
pub struct CreateBookingResponse {
    /// Display code, e.g. "BK-123456"
    pub booking_code: String,
    pub booking: BookingDetails,
    pub message: String,
}

/// Create a booking (guest surface, requires a logged-in user)
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created in pending state", body = CreateBookingResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Insufficient availability, per-line detail in body")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let details = state
        .services
        .bookings
        .create(request, &principal, false)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_code: details.booking.human_id.clone(),
            booking: details,
            message: "Booking received and awaiting approval".to_string(),
        }),
    ))
}

/// List the authenticated user's bookings, newest first
#[utoipa::path(
    get,
    path = "/my/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings owned by the caller", body = Vec<BookingDetails>)
    )
)]
pub async fn my_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list_own(&principal).await?;
    Ok(Json(bookings))
}

/// Fetch one booking by ID (owner or admin)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking with line items", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingDetails>> {
    let details = state.services.bookings.get_for_actor(id, &principal).await?;
    Ok(Json(details))
}

/// Fetch one booking by display code (owner or admin)
#[utoipa::path(
    get,
    path = "/bookings/code/{code}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("code" = String, Path, description = "Display code, e.g. BK-123456")
    ),
    responses(
        (status = 200, description = "Booking with line items", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking_by_code(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(code): Path<String>,
) -> AppResult<Json<BookingDetails>> {
    let details = state
        .services
        .bookings
        .get_by_code_for_actor(&code, &principal)
        .await?;
    Ok(Json(details))
}

/// Cancel own booking. Guests may only cancel while it is still pending;
/// cancelling a confirmed booking needs an admin.
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 403, description = "Not the owner, or booking no longer pending"),
        (status = 409, description = "Status changed concurrently")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .bookings
        .transition(id, BookingStatus::Cancelled, &principal, None)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
