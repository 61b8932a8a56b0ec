use crate::domain::audit::{AuditAction, AuditEntry, AuditStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    #[serde(with = "serde_time")]
    pub timestamp: DateTime<Utc>,
    pub status: AuditStatus,
}

impl From<AuditEntry> for AuditLogDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id.map(Into::into),
            username: entry.username,
            action: entry.action,
            resource: entry.resource,
            resource_id: entry.resource_id,
            details: entry.details,
            ip_address: entry.ip_address,
            timestamp: entry.timestamp,
            status: entry.status,
        }
    }
}
