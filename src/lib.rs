//! Kina Resort Booking System
//!
//! REST JSON API for resort bookings: service availability over date
//! ranges, multi-service booking validation, and the pending/confirmed
//! lifecycle that gates which bookings count against capacity.

use std::sync::Arc;

pub mod api;
pub mod authz;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}
