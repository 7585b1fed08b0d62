//! Statistics service for the admin overview

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::Row;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Admin overview numbers
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverviewStats {
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    /// Sum of total_amount over confirmed bookings
    pub confirmed_revenue: Decimal,
    /// Confirmed bookings checking in today
    pub arrivals_today: i64,
    /// Confirmed bookings checking out today
    pub departures_today: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn overview(&self) -> AppResult<OverviewStats> {
        let today: NaiveDate = Utc::now().date_naive();

        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                COALESCE(SUM(total_amount) FILTER (WHERE status = 'confirmed'), 0) AS confirmed_revenue,
                COUNT(*) FILTER (WHERE status = 'confirmed' AND check_in = $1) AS arrivals_today,
                COUNT(*) FILTER (WHERE status = 'confirmed' AND check_out = $1) AS departures_today
            FROM bookings
            "#,
        )
        .bind(today)
        .fetch_one(&self.repository.pool)
        .await?;

        Ok(OverviewStats {
            pending: row.get("pending"),
            confirmed: row.get("confirmed"),
            completed: row.get("completed"),
            cancelled: row.get("cancelled"),
            confirmed_revenue: row.get("confirmed_revenue"),
            arrivals_today: row.get("arrivals_today"),
            departures_today: row.get("departures_today"),
        })
    }
}
