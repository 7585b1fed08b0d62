//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, availability, bookings, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kina Resort API",
        version = "1.0.0",
        description = "Resort booking and availability REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Kina Resort", email = "reservations@kinaresort.ph")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::list_services,
        availability::check_availability,
        availability::availability_for_date,
        // Bookings (guest surface)
        bookings::create_booking,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::get_booking_by_code,
        bookings::cancel_booking,
        // Admin
        admin::create_walk_in,
        admin::list_bookings,
        admin::transition_booking,
        admin::delete_booking,
        admin::calendar,
        admin::audit_logs,
        admin::overview_stats,
    ),
    components(
        schemas(
            // Catalog
            crate::catalog::ServiceInfo,
            crate::catalog::ServiceCategory,
            // Availability
            crate::models::availability::Availability,
            crate::models::availability::AvailabilityTier,
            crate::models::availability::LineAvailability,
            crate::models::availability::ValidationReport,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingLineItem,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingSource,
            crate::models::booking::CreateBookingRequest,
            crate::models::booking::DraftLineItem,
            crate::models::booking::TransitionRequest,
            bookings::CreateBookingResponse,
            // Audit
            crate::models::audit::AuditLogEntry,
            // Stats
            crate::services::stats::OverviewStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::LineShortfall,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Service inventory and availability"),
        (name = "bookings", description = "Guest booking endpoints"),
        (name = "admin", description = "Admin dashboard endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
