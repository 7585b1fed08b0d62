//! Audit log models for admin-visible booking history

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::principal::Role;

/// One audit entry, written on every lifecycle transition or delete
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditLogEntry {
    pub id: i64,
    pub booking_id: Uuid,
    pub booking_code: String,
    /// e.g. "transition" or "delete"
    pub action: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub actor_id: Uuid,
    pub actor_role: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New audit entry prior to insertion
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub booking_id: Uuid,
    pub booking_code: String,
    pub action: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub actor_id: Uuid,
    pub actor_role: Role,
    pub notes: Option<String>,
}
