//! Data models for the Kina Resort server

pub mod audit;
pub mod availability;
pub mod booking;
pub mod principal;

// Re-export commonly used types
pub use availability::{Availability, AvailabilityTier, LineAvailability, ValidationReport};
pub use booking::{Booking, BookingDetails, BookingLineItem, BookingSource, BookingStatus};
pub use principal::{Principal, PrincipalClaims, Role};
