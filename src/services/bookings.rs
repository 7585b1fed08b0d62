//! Booking lifecycle service
//!
//! One creation path serves both the guest surface and the admin walk-in
//! surface; they differ only in the owner (none for walk-ins) and the
//! actor's role. Confirmation re-runs the availability check — pending
//! bookings reserve nothing, so confirm time is where oversells are
//! actually prevented.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    authz::{authorize, transition_allowed, BookingAction},
    catalog,
    error::{AppError, AppResult},
    models::audit::NewAuditEntry,
    models::booking::{
        BookingDetails, BookingFilter, BookingSource, BookingStatus, CreateBookingRequest,
        DraftLineItem, NewBooking, NewLineItem,
    },
    models::principal::{Principal, Role},
    pricing,
    repository::Repository,
    services::validation::BookingValidator,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    validator: BookingValidator,
}

impl BookingsService {
    pub fn new(repository: Repository, validator: BookingValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    /// Create a booking in `pending` state.
    ///
    /// Guest path: the principal owns the booking; admins are rejected
    /// here (they have the walk-in surface). Walk-in path: admin only,
    /// no owner.
    pub async fn create(
        &self,
        draft: CreateBookingRequest,
        principal: &Principal,
        walk_in: bool,
    ) -> AppResult<BookingDetails> {
        let (source, owner_user_id) = if walk_in {
            if principal.role != Role::Admin {
                return Err(AppError::Authorization(
                    "Only staff may create walk-in bookings".to_string(),
                ));
            }
            (BookingSource::WalkIn, None)
        } else {
            if principal.role == Role::Admin {
                return Err(AppError::Authorization(
                    "Admin accounts use the admin surface to create bookings".to_string(),
                ));
            }
            if principal.role != Role::User {
                return Err(AppError::Authentication(
                    "You must be logged in to create a booking".to_string(),
                ));
            }
            (BookingSource::Online, Some(principal.id))
        };

        self.validator.validate(&draft).await?;

        let mut total_amount = Decimal::ZERO;
        let mut line_items = Vec::with_capacity(draft.line_items.len());
        for line in &draft.line_items {
            let price_per_unit = catalog::price_of(&line.service_name)?;
            let days = pricing::days(line.check_in, line.check_out);
            let total_price = pricing::line_total(price_per_unit, line.quantity, days);
            total_amount += total_price;
            line_items.push(NewLineItem {
                service_name: line.service_name.clone(),
                quantity: line.quantity,
                service_check_in: line.check_in,
                service_check_out: line.check_out,
                price_per_unit,
                total_price,
            });
        }

        let new = NewBooking {
            human_id: generate_booking_code(),
            guest_name: draft.guest_name,
            email: draft.email,
            phone: draft.phone,
            adults: draft.adults,
            children: draft.children,
            check_in: draft.check_in,
            check_out: draft.check_out,
            source,
            payment_mode: draft.payment_mode,
            total_amount,
            owner_user_id,
            line_items,
        };

        let details = self.repository.bookings.create(&new).await?;
        tracing::info!(
            booking = %details.booking.human_id,
            source = ?source,
            total = %details.booking.total_amount,
            "booking created"
        );
        Ok(details)
    }

    /// Transition a booking to a new status.
    ///
    /// Confirmation re-validates availability (excluding this booking's
    /// own lines) and refuses if another booking consumed the capacity in
    /// the interim — the booking stays pending. The status update carries
    /// an optimistic guard; zero affected rows is a conflict, never a
    /// silent success.
    pub async fn transition(
        &self,
        id: Uuid,
        target: BookingStatus,
        actor: &Principal,
        notes: Option<String>,
    ) -> AppResult<()> {
        let details = self.repository.bookings.get_by_id(id).await?;
        let from = details.booking.status;
        let is_owner = details.booking.owner_user_id == Some(actor.id);

        if !transition_allowed(from, target) {
            return Err(AppError::Conflict(format!(
                "Booking {} is {}, cannot become {}",
                details.booking.human_id, from, target
            )));
        }
        let action = BookingAction::Transition { from, to: target };
        if !authorize(actor.role, is_owner, action) {
            return Err(AppError::Authorization(format!(
                "You are not allowed to make this booking {}",
                target
            )));
        }

        if target == BookingStatus::Confirmed {
            let lines: Vec<DraftLineItem> = details
                .line_items
                .iter()
                .map(|li| DraftLineItem {
                    service_name: li.service_name.clone(),
                    quantity: li.quantity,
                    check_in: li.service_check_in,
                    check_out: li.service_check_out,
                })
                .collect();
            let report = self.validator.check_availability(&lines, Some(id)).await?;
            if !report.all_sufficient {
                tracing::warn!(
                    booking = %details.booking.human_id,
                    "confirmation refused, capacity consumed since creation"
                );
                return Err(AppError::InsufficientAvailability(report.shortfalls()));
            }
        }

        let rows = self
            .repository
            .bookings
            .update_status(id, from, target, notes.as_deref())
            .await?;
        if rows == 0 {
            return Err(AppError::Conflict(format!(
                "Booking {} was changed by someone else, reload and retry",
                details.booking.human_id
            )));
        }

        tracing::info!(
            booking = %details.booking.human_id,
            from = %from,
            to = %target,
            actor = %actor.id,
            "booking status updated"
        );
        self.audit(&details, "transition", Some(from), Some(target), actor, notes)
            .await;
        Ok(())
    }

    /// Hard delete, admin only. Irreversible; intended for terminal-state
    /// bookings. Deleting a confirmed booking silently frees its capacity.
    pub async fn delete(&self, id: Uuid, actor: &Principal) -> AppResult<()> {
        if !authorize(actor.role, false, BookingAction::Delete) {
            return Err(AppError::Authorization(
                "Only staff may delete bookings".to_string(),
            ));
        }

        let details = self.repository.bookings.get_by_id(id).await?;
        let rows = self.repository.bookings.delete(id).await?;
        if rows == 0 {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }

        tracing::info!(booking = %details.booking.human_id, actor = %actor.id, "booking deleted");
        self.audit(&details, "delete", Some(details.booking.status), None, actor, None)
            .await;
        Ok(())
    }

    /// Fetch one booking; non-admins may only see their own
    pub async fn get_for_actor(&self, id: Uuid, actor: &Principal) -> AppResult<BookingDetails> {
        let details = self.repository.bookings.get_by_id(id).await?;
        self.check_visible(&details, actor)?;
        Ok(details)
    }

    /// Fetch by display code; non-admins may only see their own
    pub async fn get_by_code_for_actor(
        &self,
        code: &str,
        actor: &Principal,
    ) -> AppResult<BookingDetails> {
        let details = self.repository.bookings.get_by_human_id(code).await?;
        self.check_visible(&details, actor)?;
        Ok(details)
    }

    /// Bookings owned by the actor, newest first
    pub async fn list_own(&self, actor: &Principal) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_for_owner(actor.id).await
    }

    /// All bookings with filters (admin list)
    pub async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list(filter).await
    }

    /// Confirmed bookings overlapping a range (calendar feed)
    pub async fn calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<BookingDetails>> {
        if end < start {
            return Err(AppError::InvalidDateRange(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }
        self.repository.bookings.list_confirmed_overlapping(start, end).await
    }

    /// Recent audit entries, newest first
    pub async fn audit_recent(
        &self,
        limit: i64,
    ) -> AppResult<Vec<crate::models::audit::AuditLogEntry>> {
        self.repository.audit.list_recent(limit).await
    }

    fn check_visible(&self, details: &BookingDetails, actor: &Principal) -> AppResult<()> {
        if actor.is_admin() || details.booking.owner_user_id == Some(actor.id) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "You do not have access to this booking".to_string(),
            ))
        }
    }

    /// Audit writes must not mask the outcome of an already-applied
    /// mutation, so failures are logged and swallowed.
    async fn audit(
        &self,
        details: &BookingDetails,
        action: &str,
        from: Option<BookingStatus>,
        to: Option<BookingStatus>,
        actor: &Principal,
        notes: Option<String>,
    ) {
        let entry = NewAuditEntry {
            booking_id: details.booking.id,
            booking_code: details.booking.human_id.clone(),
            action: action.to_string(),
            from_status: from.map(|s| s.to_string()),
            to_status: to.map(|s| s.to_string()),
            actor_id: actor.id,
            actor_role: actor.role,
            notes,
        };
        if let Err(e) = self.repository.audit.insert(&entry).await {
            tracing::warn!(booking = %entry.booking_code, error = %e, "audit log write failed");
        }
    }
}

/// Display code like "BK-123456". Random, best-effort unique; never used
/// as a key.
fn generate_booking_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("BK-{}", n)
}
