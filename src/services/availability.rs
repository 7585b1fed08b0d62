//! Availability calculator
//!
//! Computes remaining capacity per service over a date range from
//! confirmed bookings only. Pending bookings never reserve capacity;
//! capacity is claimed on admin approval.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    catalog,
    error::{AppError, AppResult},
    models::availability::Availability,
    repository::bookings::BookingsRepository,
};

/// Store seam for the overlap query, so the calculator depends on fresh
/// reads only and can be exercised without a database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Sum of confirmed quantities for `service_name` whose line date
    /// range overlaps [start, end].
    async fn confirmed_quantity_overlapping(
        &self,
        service_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<i64>;
}

#[async_trait]
impl AvailabilityStore for BookingsRepository {
    async fn confirmed_quantity_overlapping(
        &self,
        service_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<i64> {
        BookingsRepository::confirmed_quantity_overlapping(
            self,
            service_name,
            start,
            end,
            exclude_booking_id,
        )
        .await
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn AvailabilityStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn AvailabilityStore>) -> Self {
        Self { store }
    }

    /// Remaining capacity for a service over [start, end].
    ///
    /// Fails open: if the overlap query itself fails, full capacity is
    /// reported rather than zero. A rare oversell caught by a human beats
    /// a booking page that a transient store error has made unusable.
    pub async fn compute(
        &self,
        service_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<Availability> {
        let total = catalog::capacity_of(service_name)?;

        if end < start {
            return Err(AppError::InvalidDateRange(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }

        let booked = match self
            .store
            .confirmed_quantity_overlapping(service_name, start, end, exclude_booking_id)
            .await
        {
            Ok(booked) => booked,
            Err(e) => {
                tracing::warn!(
                    service = service_name,
                    error = %e,
                    "availability query failed, assuming full capacity"
                );
                return Ok(Availability::new(total, total));
            }
        };

        let available = (total as i64 - booked).max(0) as i32;
        Ok(Availability::new(available, total))
    }

    /// Availability of every catalog service on a single date, for
    /// calendar badges. Function halls book exactly one day per event, so
    /// the single-date form covers everything.
    pub async fn for_date(&self, date: NaiveDate) -> AppResult<HashMap<String, Availability>> {
        let mut result = HashMap::new();
        for service in catalog::all_services() {
            let availability = self.compute(service.name, date, date, None).await?;
            result.insert(service.name.to_string(), availability);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::availability::AvailabilityTier;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service_with(store: MockAvailabilityStore) -> AvailabilityService {
        AvailabilityService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn overlapping_confirmed_quantities_reduce_availability() {
        // two confirmed lines (2 + 1) overlap the probed date
        let mut store = MockAvailabilityStore::new();
        store
            .expect_confirmed_quantity_overlapping()
            .returning(|_, _, _, _| Ok(3));

        let availability = service_with(store)
            .compute("Standard Room", d("2025-06-11"), d("2025-06-11"), None)
            .await
            .unwrap();

        assert_eq!(availability.available, 1);
        assert_eq!(availability.total, 4);
        // 1 <= ceil(4 * 0.25)
        assert_eq!(availability.status, AvailabilityTier::LowStock);
    }

    #[tokio::test]
    async fn fully_booked_hall() {
        let mut store = MockAvailabilityStore::new();
        store
            .expect_confirmed_quantity_overlapping()
            .returning(|_, _, _, _| Ok(1));

        let availability = service_with(store)
            .compute("Grand Function Hall", d("2025-07-01"), d("2025-07-01"), None)
            .await
            .unwrap();

        assert_eq!(availability.available, 0);
        assert_eq!(availability.status, AvailabilityTier::FullyBooked);
    }

    #[tokio::test]
    async fn overbooked_store_clamps_to_zero() {
        let mut store = MockAvailabilityStore::new();
        store
            .expect_confirmed_quantity_overlapping()
            .returning(|_, _, _, _| Ok(9));

        let availability = service_with(store)
            .compute("Standard Room", d("2025-06-01"), d("2025-06-02"), None)
            .await
            .unwrap();

        assert_eq!(availability.available, 0);
    }

    #[tokio::test]
    async fn query_failure_fails_open() {
        // A failed read reports full capacity, never zero and never an
        // error. Deliberate trade-off: a transient store error must not
        // silently block every booking.
        let mut store = MockAvailabilityStore::new();
        store
            .expect_confirmed_quantity_overlapping()
            .returning(|_, _, _, _| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let availability = service_with(store)
            .compute("Standard Room", d("2025-06-01"), d("2025-06-02"), None)
            .await
            .unwrap();

        assert_eq!(availability.available, 4);
        assert_eq!(availability.total, 4);
        assert_eq!(availability.status, AvailabilityTier::Available);
    }

    #[tokio::test]
    async fn unknown_service_is_an_error_before_any_read() {
        let mut store = MockAvailabilityStore::new();
        store.expect_confirmed_quantity_overlapping().never();

        let err = service_with(store)
            .compute("Tree House", d("2025-06-01"), d("2025-06-02"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownService(_)));
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let store = MockAvailabilityStore::new();
        let err = service_with(store)
            .compute("Standard Room", d("2025-06-02"), d("2025-06-01"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDateRange(_)));
    }
}
