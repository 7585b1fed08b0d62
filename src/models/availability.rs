//! Availability models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LineShortfall;

/// Display tier for remaining capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityTier {
    Available,
    LowStock,
    FullyBooked,
}

/// Remaining capacity for one service over a date range
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Availability {
    pub available: i32,
    pub total: i32,
    pub status: AvailabilityTier,
}

impl Availability {
    /// Derive the tier from remaining and total capacity. Low-stock cuts
    /// in at 25% of total, rounded up.
    pub fn new(available: i32, total: i32) -> Self {
        let status = if available == 0 {
            AvailabilityTier::FullyBooked
        } else if available <= (total as f64 * 0.25).ceil() as i32 {
            AvailabilityTier::LowStock
        } else {
            AvailabilityTier::Available
        };
        Self {
            available,
            total,
            status,
        }
    }
}

/// Availability verdict for one requested line
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineAvailability {
    pub service_name: String,
    pub requested: i32,
    pub available: i32,
    pub sufficient: bool,
}

/// Whole-booking availability report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationReport {
    pub all_sufficient: bool,
    pub per_line: Vec<LineAvailability>,
}

impl ValidationReport {
    /// Shortfall detail for every insufficient line
    pub fn shortfalls(&self) -> Vec<LineShortfall> {
        self.per_line
            .iter()
            .filter(|l| !l.sufficient)
            .map(|l| LineShortfall {
                service_name: l.service_name.clone(),
                requested: l.requested,
                available: l.available,
            })
            .collect()
    }
}
