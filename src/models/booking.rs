//! Booking and line item models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Booking lifecycle status.
///
/// Only `confirmed` bookings count against availability; `pending`
/// bookings never reserve capacity. Capacity is claimed on admin
/// approval, not at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// How the booking entered the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    Online,
    WalkIn,
}

/// Booking record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    /// Human-readable display code (e.g. "BK-123456"), never a key
    pub human_id: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub adults: i32,
    pub children: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub source: BookingSource,
    pub payment_mode: Option<String>,
    pub status: BookingStatus,
    pub total_amount: Decimal,
    /// NULL for walk-in bookings created by staff
    pub owner_user_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One service entry within a booking, with its own quantity and dates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingLineItem {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub service_name: String,
    pub quantity: i32,
    /// Line dates may differ from the booking's overall range
    /// (e.g. cottage dates nested inside the room stay)
    pub service_check_in: NaiveDate,
    pub service_check_out: NaiveDate,
    /// Price snapshot taken at booking time
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
}

/// Booking with its line items
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub line_items: Vec<BookingLineItem>,
}

/// One requested line in a draft booking
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DraftLineItem {
    pub service_name: String,
    pub quantity: i32,
    /// YYYY-MM-DD
    pub check_in: NaiveDate,
    /// YYYY-MM-DD
    pub check_out: NaiveDate,
}

/// Create booking request (guest and walk-in surfaces share this shape)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "guest name is required"))]
    pub guest_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(range(min = 1, max = 100, message = "adults out of range"))]
    pub adults: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "children out of range"))]
    pub children: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub payment_mode: Option<String>,
    pub line_items: Vec<DraftLineItem>,
}

/// Validated booking ready for insertion, priced and coded
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub human_id: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub adults: i32,
    pub children: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub source: BookingSource,
    pub payment_mode: Option<String>,
    pub total_amount: Decimal,
    pub owner_user_id: Option<Uuid>,
    pub line_items: Vec<NewLineItem>,
}

/// Priced line item ready for insertion
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub service_name: String,
    pub quantity: i32,
    pub service_check_in: NaiveDate,
    pub service_check_out: NaiveDate,
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
}

/// Status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRequest {
    pub status: BookingStatus,
    pub notes: Option<String>,
}

/// Filters for the admin booking list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    /// Keep bookings checking in on or after this date
    pub start_date: Option<NaiveDate>,
    /// Keep bookings checking out on or before this date
    pub end_date: Option<NaiveDate>,
}
