//! Audit log repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::audit::{AuditLogEntry, NewAuditEntry},
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Record one lifecycle action
    pub async fn insert(&self, entry: &NewAuditEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
                booking_id, booking_code, action, from_status, to_status,
                actor_id, actor_role, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.booking_id)
        .bind(&entry.booking_code)
        .bind(&entry.action)
        .bind(&entry.from_status)
        .bind(&entry.to_status)
        .bind(entry.actor_id)
        .bind(entry.actor_role.to_string())
        .bind(&entry.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Most recent entries, newest first
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>> {
        let entries = sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
