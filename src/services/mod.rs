//! Business logic services

pub mod availability;
pub mod bookings;
pub mod stats;
pub mod validation;

use std::sync::Arc;

use crate::{config::BookingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub validator: validation::BookingValidator,
    pub bookings: bookings::BookingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, booking_config: &BookingConfig) -> Self {
        let store = Arc::new(repository.bookings.clone());
        let availability = availability::AvailabilityService::new(store);
        let validator = validation::BookingValidator::new(
            availability.clone(),
            booking_config.max_guests_per_booking,
        );
        let bookings = bookings::BookingsService::new(repository.clone(), validator.clone());
        let stats = stats::StatsService::new(repository);

        Self {
            availability,
            validator,
            bookings,
            stats,
        }
    }
}
