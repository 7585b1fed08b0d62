//! Admin dashboard endpoints: walk-in creation, booking management,
//! audit logs, and overview stats

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::audit::AuditLogEntry,
    models::booking::{BookingDetails, BookingFilter, CreateBookingRequest, TransitionRequest},
    services::stats::OverviewStats,
};

use super::AdminUser;

/// Query for the calendar feed
#[derive(Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Start of the range (YYYY-MM-DD)
    pub start: NaiveDate,
    /// End of the range (YYYY-MM-DD), inclusive
    pub end: NaiveDate,
}

/// Create a walk-in booking on behalf of a guest with no account
#[utoipa::path(
    post,
    path = "/admin/bookings/walk-in",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Walk-in booking created in pending state", body = BookingDetails),
        (status = 409, description = "Insufficient availability")
    )
)]
pub async fn create_walk_in(
    State(state): State<crate::AppState>,
    AdminUser(principal): AdminUser,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let details = state
        .services
        .bookings
        .create(request, &principal, true)
        .await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// List all bookings with optional filters
#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(BookingFilter),
    responses(
        (status = 200, description = "All bookings, newest first", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AdminUser(_principal): AdminUser,
    Query(filter): Query<BookingFilter>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list(&filter).await?;
    Ok(Json(bookings))
}

/// Transition a booking's status (confirm, cancel, complete).
///
/// Confirming re-validates availability; if capacity was consumed since
/// the booking was created, the confirm is refused and the booking stays
/// pending.
#[utoipa::path(
    put,
    path = "/admin/bookings/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = TransitionRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 409, description = "Illegal transition, concurrent change, or insufficient availability")
    )
)]
pub async fn transition_booking(
    State(state): State<crate::AppState>,
    AdminUser(principal): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .bookings
        .transition(id, request.status, &principal, request.notes)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete a booking. Irreversible; meant for terminal-state
/// bookings — deleting a confirmed booking frees its capacity with no
/// trace outside the audit log.
#[utoipa::path(
    delete,
    path = "/admin/bookings/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    AdminUser(principal): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Confirmed bookings overlapping a date range, for the admin calendar
#[utoipa::path(
    get,
    path = "/admin/calendar",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(CalendarQuery),
    responses(
        (status = 200, description = "Confirmed bookings in the range", body = Vec<BookingDetails>)
    )
)]
pub async fn calendar(
    State(state): State<crate::AppState>,
    AdminUser(_principal): AdminUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.calendar(query.start, query.end).await?;
    Ok(Json(bookings))
}

/// Recent audit log entries, newest first
#[utoipa::path(
    get,
    path = "/admin/audit-logs",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recent lifecycle actions", body = Vec<AuditLogEntry>)
    )
)]
pub async fn audit_logs(
    State(state): State<crate::AppState>,
    AdminUser(_principal): AdminUser,
) -> AppResult<Json<Vec<AuditLogEntry>>> {
    let entries = state.services.bookings.audit_recent(200).await?;
    Ok(Json(entries))
}

/// Overview stats for the dashboard landing page
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking counts and revenue", body = OverviewStats)
    )
)]
pub async fn overview_stats(
    State(state): State<crate::AppState>,
    AdminUser(_principal): AdminUser,
) -> AppResult<Json<OverviewStats>> {
    let stats = state.services.stats.overview().await?;
    Ok(Json(stats))
}
