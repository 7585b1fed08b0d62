//! Static service inventory for the resort
//!
//! One entry per bookable service, fixed for the lifetime of the process.
//! Capacity is independent of date (no seasonal variation).

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Category of a bookable service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Room,
    Cottage,
    FunctionHall,
}

impl ServiceCategory {
    /// Whether line items of this category must nest inside the sibling
    /// room date range. Business rule: cottages are day-use within the
    /// room stay; function halls book a single standalone day.
    pub fn nests_within_rooms(&self) -> bool {
        matches!(self, ServiceCategory::Cottage)
    }
}

/// One row of the service inventory
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub category: ServiceCategory,
    /// Total units available at any time
    pub total_capacity: i32,
    /// Price per unit per day
    pub price_per_unit: Decimal,
}

static SERVICES: Lazy<Vec<ServiceInfo>> = Lazy::new(|| {
    vec![
        ServiceInfo {
            name: "Standard Room",
            category: ServiceCategory::Room,
            total_capacity: 4,
            price_per_unit: Decimal::from(2000),
        },
        ServiceInfo {
            name: "Open Cottage",
            category: ServiceCategory::Cottage,
            total_capacity: 4,
            price_per_unit: Decimal::from(300),
        },
        ServiceInfo {
            name: "Standard Cottage",
            category: ServiceCategory::Cottage,
            total_capacity: 4,
            price_per_unit: Decimal::from(400),
        },
        ServiceInfo {
            name: "Family Cottage",
            category: ServiceCategory::Cottage,
            total_capacity: 4,
            price_per_unit: Decimal::from(500),
        },
        ServiceInfo {
            name: "Grand Function Hall",
            category: ServiceCategory::FunctionHall,
            total_capacity: 1,
            price_per_unit: Decimal::from(15000),
        },
        ServiceInfo {
            name: "Intimate Function Hall",
            category: ServiceCategory::FunctionHall,
            total_capacity: 1,
            price_per_unit: Decimal::from(10000),
        },
    ]
});

/// All services in the inventory
pub fn all_services() -> &'static [ServiceInfo] {
    &SERVICES
}

/// Look up a service by name
pub fn get(service_name: &str) -> AppResult<&'static ServiceInfo> {
    SERVICES
        .iter()
        .find(|s| s.name == service_name)
        .ok_or_else(|| AppError::UnknownService(service_name.to_string()))
}

/// Total capacity of a service
pub fn capacity_of(service_name: &str) -> AppResult<i32> {
    get(service_name).map(|s| s.total_capacity)
}

/// Per-unit, per-day price of a service
pub fn price_of(service_name: &str) -> AppResult<Decimal> {
    get(service_name).map(|s| s.price_per_unit)
}

/// Category of a service
pub fn category_of(service_name: &str) -> AppResult<ServiceCategory> {
    get(service_name).map(|s| s.category)
}
