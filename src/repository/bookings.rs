//! Bookings repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingDetails, BookingFilter, BookingLineItem, BookingStatus, NewBooking,
    },
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Sum of confirmed quantities for a service over line items whose
    /// date range overlaps [start, end] (inclusive on both ends).
    ///
    /// `exclude_booking_id` removes a booking's own lines from the sum
    /// when re-checking an existing booking, so it never blocks itself.
    pub async fn confirmed_quantity_overlapping(
        &self,
        service_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<i64> {
        let booked: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(li.quantity), 0)::bigint
            FROM booking_line_items li
            JOIN bookings b ON b.id = li.booking_id
            WHERE li.service_name = $1
              AND b.status = 'confirmed'
              AND li.service_check_in <= $2
              AND li.service_check_out >= $3
              AND ($4::uuid IS NULL OR li.booking_id <> $4)
            "#,
        )
        .bind(service_name)
        .bind(end)
        .bind(start)
        .bind(exclude_booking_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(booked)
    }

    /// Insert a booking and its line items as one unit. Either everything
    /// persists or nothing does.
    pub async fn create(&self, new: &NewBooking) -> AppResult<BookingDetails> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                human_id, guest_name, email, phone, adults, children,
                check_in, check_out, source, payment_mode, status,
                total_amount, owner_user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11, $12)
            RETURNING *
            "#,
        )
        .bind(&new.human_id)
        .bind(&new.guest_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(new.adults)
        .bind(new.children)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.source)
        .bind(&new.payment_mode)
        .bind(new.total_amount)
        .bind(new.owner_user_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut line_items = Vec::with_capacity(new.line_items.len());
        for item in &new.line_items {
            let row = sqlx::query_as::<_, BookingLineItem>(
                r#"
                INSERT INTO booking_line_items (
                    booking_id, service_name, quantity,
                    service_check_in, service_check_out,
                    price_per_unit, total_price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(booking.id)
            .bind(&item.service_name)
            .bind(item.quantity)
            .bind(item.service_check_in)
            .bind(item.service_check_out)
            .bind(item.price_per_unit)
            .bind(item.total_price)
            .fetch_one(&mut *tx)
            .await?;
            line_items.push(row);
        }

        tx.commit().await?;

        Ok(BookingDetails {
            booking,
            line_items,
        })
    }

    /// Get booking by ID with its line items
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookingDetails> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        let line_items = self.line_items_of(id).await?;
        Ok(BookingDetails {
            booking,
            line_items,
        })
    }

    /// Get booking by its display code (e.g. "BK-123456")
    pub async fn get_by_human_id(&self, human_id: &str) -> AppResult<BookingDetails> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE human_id = $1")
            .bind(human_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", human_id)))?;

        let line_items = self.line_items_of(booking.id).await?;
        Ok(BookingDetails {
            booking,
            line_items,
        })
    }

    /// Line items of one booking
    pub async fn line_items_of(&self, booking_id: Uuid) -> AppResult<Vec<BookingLineItem>> {
        let items = sqlx::query_as::<_, BookingLineItem>(
            "SELECT * FROM booking_line_items WHERE booking_id = $1 ORDER BY service_check_in",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Bookings owned by a user, newest first
    pub async fn list_for_owner(&self, owner_user_id: Uuid) -> AppResult<Vec<BookingDetails>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE owner_user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_line_items(bookings).await
    }

    /// All bookings with optional status/date filters, newest first
    pub async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::booking_status IS NULL OR status = $1)
              AND ($2::date IS NULL OR check_in >= $2)
              AND ($3::date IS NULL OR check_out <= $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.pool)
        .await?;

        self.with_line_items(bookings).await
    }

    /// Confirmed bookings overlapping a date range, for the calendar feed
    pub async fn list_confirmed_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<BookingDetails>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE status = 'confirmed'
              AND check_in <= $1
              AND check_out >= $2
            ORDER BY check_in
            "#,
        )
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        self.with_line_items(bookings).await
    }

    /// Update status with an optimistic guard on the expected current
    /// status. Returns the number of rows affected; zero means the status
    /// changed underneath us (or the row is gone) and must be treated as
    /// a conflict, never as success.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        target: BookingStatus,
        notes: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $1, notes = COALESCE($2, notes), updated_at = NOW()
            WHERE id = $3 AND status = $4
            "#,
        )
        .bind(target)
        .bind(notes)
        .bind(id)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Hard delete. Line items go with the booking (FK cascade).
    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn with_line_items(&self, bookings: Vec<Booking>) -> AppResult<Vec<BookingDetails>> {
        let mut result = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let line_items = self.line_items_of(booking.id).await?;
            result.push(BookingDetails {
                booking,
                line_items,
            });
        }
        Ok(result)
    }
}
