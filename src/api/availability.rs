//! Availability endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    catalog::{self, ServiceInfo},
    error::AppResult,
    models::availability::Availability,
};

/// Query for a service availability check
#[derive(Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Catalog service name, e.g. "Standard Room"
    pub service: String,
    /// Start of the range (YYYY-MM-DD)
    pub start: NaiveDate,
    /// End of the range (YYYY-MM-DD), inclusive
    pub end: NaiveDate,
}

/// List the service inventory
#[utoipa::path(
    get,
    path = "/services",
    tag = "availability",
    responses(
        (status = 200, description = "Service inventory", body = Vec<ServiceInfo>)
    )
)]
pub async fn list_services() -> Json<Vec<ServiceInfo>> {
    Json(catalog::all_services().to_vec())
}

/// Remaining capacity for one service over a date range
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Remaining capacity", body = Availability),
        (status = 400, description = "Unknown service or invalid range")
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Availability>> {
    let availability = state
        .services
        .availability
        .compute(&query.service, query.start, query.end, None)
        .await?;
    Ok(Json(availability))
}

/// Availability of every service on a single date (calendar badges)
#[utoipa::path(
    get,
    path = "/availability/date/{date}",
    tag = "availability",
    params(
        ("date" = String, Path, description = "Date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Per-service availability for the date")
    )
)]
pub async fn availability_for_date(
    State(state): State<crate::AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<HashMap<String, Availability>>> {
    let result = state.services.availability.for_date(date).await?;
    Ok(Json(result))
}
