use crate::domain::audit::entity::{AuditAction, AuditEntry, NewAuditEntry};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub user_id: Option<UserId>,
    pub resource: Option<String>,
    pub action: Option<AuditAction>,
}

impl AuditLogFilter {
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.user_id.is_none_or(|id| entry.user_id == Some(id))
            && self
                .resource
                .as_deref()
                .is_none_or(|resource| entry.resource == resource)
            && self.action.is_none_or(|action| entry.action == action)
    }
}

/// Append-only store for the audit trail: insert and read, nothing else.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry>;

    /// Newest first, ties broken by id descending.
    async fn list(
        &self,
        filter: &AuditLogFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>>;
}
