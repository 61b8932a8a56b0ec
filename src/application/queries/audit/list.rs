use super::AuditQueryService;
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        dto::AuditLogDto,
        error::ApplicationResult,
        queries::normalize_limit,
    },
    domain::{
        audit::{AuditAction, AuditLogFilter},
        user::UserId,
    },
};

const AUDIT_RESOURCE: &str = "audit_logs";
const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default)]
pub struct ListAuditLogsQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub user_id: Option<i64>,
    pub resource: Option<String>,
    pub action: Option<AuditAction>,
}

impl AuditQueryService {
    /// Newest entries first. Reading the trail is itself recorded, after the
    /// page has been fetched.
    pub async fn list_audit_logs(
        &self,
        actor: &RequestActor,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        let skip = query.skip.unwrap_or(0);
        let limit = normalize_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let details = format!("list audit logs skip={skip} limit={limit}");

        let outcome = self.fetch(query, skip, limit).await;
        self.recorder
            .record_outcome(
                AuditRecord::new(actor.clone(), AuditAction::Read, AUDIT_RESOURCE)
                    .with_details(details),
                &outcome,
                |_| None,
            )
            .await;
        outcome
    }

    async fn fetch(
        &self,
        query: ListAuditLogsQuery,
        skip: u32,
        limit: u32,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        let filter = AuditLogFilter {
            user_id: query.user_id.map(UserId::new).transpose()?,
            resource: query.resource.filter(|r| !r.trim().is_empty()),
            action: query.action,
        };
        let entries = self.recorder.list(&filter, skip, limit).await?;
        Ok(entries.into_iter().map(AuditLogDto::from).collect())
    }
}
