use super::error::{map_sqlx, stored_enum};
use crate::domain::audit::{
    AuditEntry, AuditLogFilter, AuditLogRepository, NewAuditEntry,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const AUDIT_COLUMNS: &str =
    "id, user_id, username, action, resource, resource_id, details, ip_address, timestamp, status";

/// Only INSERT and SELECT are ever issued against `audit_logs`.
#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    id: i64,
    user_id: Option<i64>,
    username: Option<String>,
    action: String,
    resource: String,
    resource_id: Option<i64>,
    details: Option<String>,
    ip_address: Option<String>,
    timestamp: DateTime<Utc>,
    status: String,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: row.id,
            user_id: row.user_id.map(UserId),
            username: row.username,
            action: stored_enum(&row.action)?,
            resource: row.resource,
            resource_id: row.resource_id,
            details: row.details,
            ip_address: row.ip_address,
            timestamp: row.timestamp,
            status: stored_enum(&row.status)?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        let sql = format!(
            "INSERT INTO audit_logs
                (user_id, username, action, resource, resource_id, details, ip_address, timestamp, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {AUDIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(entry.user_id.map(i64::from))
            .bind(entry.username)
            .bind(entry.action.as_str())
            .bind(entry.resource)
            .bind(entry.resource_id)
            .bind(entry.details)
            .bind(entry.ip_address)
            .bind(entry.timestamp)
            .bind(entry.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        AuditEntry::try_from(row)
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>> {
        let sql = format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR resource = $2)
               AND ($3::TEXT IS NULL OR action = $3)
             ORDER BY timestamp DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(filter.user_id.map(i64::from))
            .bind(filter.resource.as_deref())
            .bind(filter.action.map(|action| action.as_str()))
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
