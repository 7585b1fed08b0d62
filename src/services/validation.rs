//! Booking validator
//!
//! Structural checks run before any store access; the availability check
//! re-queries every line against its own date range. A booking is
//! rejected whole if any single line is short — no partial bookings.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    catalog,
    error::{AppError, AppResult},
    models::availability::{LineAvailability, ValidationReport},
    models::booking::{CreateBookingRequest, DraftLineItem},
    services::availability::AvailabilityService,
};

#[derive(Clone)]
pub struct BookingValidator {
    availability: AvailabilityService,
    /// Per-booking guest cap (adults + children)
    max_guests: i32,
}

impl BookingValidator {
    pub fn new(availability: AvailabilityService, max_guests: i32) -> Self {
        Self {
            availability,
            max_guests,
        }
    }

    /// Validate everything that needs no store access: guest fields,
    /// guest cap, date ranges, quantities, and per-category date nesting.
    pub fn validate_structure(&self, draft: &CreateBookingRequest) -> AppResult<()> {
        if draft.line_items.is_empty() {
            return Err(AppError::Validation(
                "A booking needs at least one service".to_string(),
            ));
        }

        if draft.guest_name.trim().is_empty()
            || draft.email.trim().is_empty()
            || draft.phone.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Guest name, email and phone are required".to_string(),
            ));
        }

        if draft.adults < 1 {
            return Err(AppError::Validation(
                "At least one adult is required".to_string(),
            ));
        }
        if draft.children < 0 {
            return Err(AppError::Validation(
                "Children count cannot be negative".to_string(),
            ));
        }
        // widened so hostile counts cannot overflow past the cap
        if i64::from(draft.adults) + i64::from(draft.children) > i64::from(self.max_guests) {
            return Err(AppError::GuestCapExceeded(format!(
                "Total guests cannot exceed {}",
                self.max_guests
            )));
        }

        if draft.check_out < draft.check_in {
            return Err(AppError::InvalidDateRange(format!(
                "check-out {} precedes check-in {}",
                draft.check_out, draft.check_in
            )));
        }

        for line in &draft.line_items {
            let service = catalog::get(&line.service_name)?;

            if line.quantity < 1 {
                return Err(AppError::Validation(format!(
                    "Quantity for {} must be at least 1",
                    line.service_name
                )));
            }
            if line.quantity > service.total_capacity {
                return Err(AppError::Validation(format!(
                    "Quantity for {} exceeds its total capacity of {}",
                    line.service_name, service.total_capacity
                )));
            }
            if line.check_out < line.check_in {
                return Err(AppError::InvalidDateRange(format!(
                    "{}: check-out {} precedes check-in {}",
                    line.service_name, line.check_out, line.check_in
                )));
            }
        }

        self.validate_nesting(draft)
    }

    /// Lines of nesting categories (cottages) must fall within the
    /// sibling room date range when a room line is present, otherwise
    /// within the booking's overall range.
    fn validate_nesting(&self, draft: &CreateBookingRequest) -> AppResult<()> {
        let room_envelope = Self::room_envelope(&draft.line_items)?;
        let (outer_in, outer_out) = room_envelope.unwrap_or((draft.check_in, draft.check_out));

        for line in &draft.line_items {
            let category = catalog::category_of(&line.service_name)?;
            if !category.nests_within_rooms() {
                continue;
            }
            if line.check_in < outer_in || line.check_out > outer_out {
                return Err(AppError::InvalidDateRange(format!(
                    "{} dates {}..{} must fall within the stay {}..{}",
                    line.service_name, line.check_in, line.check_out, outer_in, outer_out
                )));
            }
        }
        Ok(())
    }

    /// Span covered by the room lines of a draft, if any
    fn room_envelope(lines: &[DraftLineItem]) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        let mut envelope: Option<(NaiveDate, NaiveDate)> = None;
        for line in lines {
            if catalog::category_of(&line.service_name)? == catalog::ServiceCategory::Room {
                envelope = Some(match envelope {
                    None => (line.check_in, line.check_out),
                    Some((lo, hi)) => (lo.min(line.check_in), hi.max(line.check_out)),
                });
            }
        }
        Ok(envelope)
    }

    /// Check every line against fresh availability for its own date
    /// range. Used both at creation and again at confirmation time.
    pub async fn check_availability(
        &self,
        lines: &[DraftLineItem],
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<ValidationReport> {
        let mut per_line = Vec::with_capacity(lines.len());
        for line in lines {
            let availability = self
                .availability
                .compute(
                    &line.service_name,
                    line.check_in,
                    line.check_out,
                    exclude_booking_id,
                )
                .await?;
            per_line.push(LineAvailability {
                service_name: line.service_name.clone(),
                requested: line.quantity,
                available: availability.available,
                sufficient: line.quantity <= availability.available,
            });
        }

        let all_sufficient = per_line.iter().all(|l| l.sufficient);
        Ok(ValidationReport {
            all_sufficient,
            per_line,
        })
    }

    /// Full validation for a draft booking: structure first, then
    /// availability. An insufficient line fails the whole draft.
    pub async fn validate(&self, draft: &CreateBookingRequest) -> AppResult<ValidationReport> {
        self.validate_structure(draft)?;
        let report = self.check_availability(&draft.line_items, None).await?;
        if !report.all_sufficient {
            return Err(AppError::InsufficientAvailability(report.shortfalls()));
        }
        Ok(report)
    }
}
