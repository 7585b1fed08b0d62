//! Error types for the Kina Resort server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes returned in response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchBooking = 4,
    UnknownService = 5,
    InsufficientAvailability = 6,
    Conflict = 7,
    BadValue = 8,
    GuestCapExceeded = 9,
    InvalidDateRange = 10,
}

/// Per-line availability shortfall, attached to rejected bookings so the
/// caller can name exactly which line fell short and by how much.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LineShortfall {
    pub service_name: String,
    pub requested: i32,
    pub available: i32,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Guest cap exceeded: {0}")]
    GuestCapExceeded(String),

    #[error("Insufficient availability")]
    InsufficientAvailability(Vec<LineShortfall>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message for availability rejections, naming every insufficient
    /// line so the whole-booking rejection is never opaque to the guest.
    fn shortfall_message(lines: &[LineShortfall]) -> String {
        let parts: Vec<String> = lines
            .iter()
            .map(|l| {
                format!(
                    "{} (need {}, available {})",
                    l.service_name, l.requested, l.available
                )
            })
            .collect();
        format!("Not enough availability for: {}", parts.join(", "))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Per-line shortfall detail, present only for availability rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<LineShortfall>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone(), None)
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBooking, msg.clone(), None)
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone(), None)
            }
            AppError::UnknownService(name) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::UnknownService,
                format!("Unknown service: {}", name),
                None,
            ),
            AppError::InvalidDateRange(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidDateRange, msg.clone(), None)
            }
            AppError::GuestCapExceeded(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::GuestCapExceeded, msg.clone(), None)
            }
            AppError::InsufficientAvailability(lines) => (
                StatusCode::CONFLICT,
                ErrorCode::InsufficientAvailability,
                Self::shortfall_message(lines),
                Some(lines.clone()),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone(), None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
