// src/application/audit/mod.rs
//! Append-only audit trail. Writes are best effort: a failed insert is logged
//! and never changes the outcome of the operation being recorded.
use std::sync::Arc;

use crate::application::{dto::AuthenticatedUser, error::ApplicationResult, ports::time::Clock};
use crate::domain::audit::{
    AuditAction, AuditEntry, AuditLogFilter, AuditLogRepository, AuditStatus, NewAuditEntry,
};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;

/// Who performed a request, as far as the audit trail is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestActor {
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub ip_address: Option<String>,
}

impl RequestActor {
    pub fn from_user(user: &AuthenticatedUser, ip_address: Option<String>) -> Self {
        Self {
            user_id: Some(user.id()),
            username: Some(user.username().to_string()),
            ip_address,
        }
    }

    /// A caller with no verified identity, e.g. a failed login attempt.
    pub fn anonymous(attempted_username: Option<String>, ip_address: Option<String>) -> Self {
        Self {
            user_id: None,
            username: attempted_username,
            ip_address,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub actor: RequestActor,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
    pub status: AuditStatus,
}

impl AuditRecord {
    pub fn new(actor: RequestActor, action: AuditAction, resource: impl Into<String>) -> Self {
        Self {
            actor,
            action,
            resource: resource.into(),
            resource_id: None,
            details: None,
            status: AuditStatus::Success,
        }
    }

    pub fn with_resource_id(mut self, id: impl Into<i64>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn failed(mut self) -> Self {
        self.status = AuditStatus::Failed;
        self
    }

    fn into_new_entry(self, timestamp: chrono::DateTime<chrono::Utc>) -> NewAuditEntry {
        NewAuditEntry {
            user_id: self.actor.user_id,
            username: self.actor.username,
            action: self.action,
            resource: self.resource,
            resource_id: self.resource_id,
            details: self.details,
            ip_address: self.actor.ip_address,
            timestamp,
            status: self.status,
        }
    }
}

pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Append one entry, stamped with the recorder's clock.
    pub async fn try_record(&self, record: AuditRecord) -> DomainResult<AuditEntry> {
        let entry = record.into_new_entry(self.clock.now());
        self.repo.insert(entry).await
    }

    pub async fn record(&self, record: AuditRecord) {
        let action = record.action;
        let resource = record.resource.clone();
        if let Err(err) = self.try_record(record).await {
            tracing::error!(
                target: "audit",
                error = %err,
                action = %action,
                resource = %resource,
                "failed to write audit entry"
            );
        }
    }

    /// Record the outcome of an operation that already ran. On success the
    /// id picked by `resource_id` fills in a missing resource id; on failure
    /// the error text becomes the details.
    pub async fn record_outcome<T>(
        &self,
        mut record: AuditRecord,
        outcome: &ApplicationResult<T>,
        resource_id: impl FnOnce(&T) -> Option<i64>,
    ) {
        match outcome {
            Ok(value) => {
                if record.resource_id.is_none() {
                    record.resource_id = resource_id(value);
                }
            }
            Err(err) => {
                record = record.failed();
                record.details = Some(match record.details.take() {
                    Some(details) => format!("{details}: {err}"),
                    None => err.to_string(),
                });
            }
        }
        self.record(record).await;
    }

    pub async fn list(
        &self,
        filter: &AuditLogFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>> {
        self.repo.list(filter, skip, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::domain::errors::DomainError;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        }
    }

    #[derive(Default)]
    struct VecRepo {
        rows: Mutex<Vec<AuditEntry>>,
    }

    #[async_trait]
    impl AuditLogRepository for VecRepo {
        async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
            let mut rows = self.rows.lock().unwrap();
            let stored = entry.into_entry(rows.len() as i64 + 1);
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn list(
            &self,
            _filter: &AuditLogFilter,
            _skip: u32,
            _limit: u32,
        ) -> DomainResult<Vec<AuditEntry>> {
            Ok(self.rows.lock().unwrap().clone())
        }
    }

    struct BrokenRepo;

    #[async_trait]
    impl AuditLogRepository for BrokenRepo {
        async fn insert(&self, _entry: NewAuditEntry) -> DomainResult<AuditEntry> {
            Err(DomainError::Persistence("disk full".into()))
        }

        async fn list(
            &self,
            _filter: &AuditLogFilter,
            _skip: u32,
            _limit: u32,
        ) -> DomainResult<Vec<AuditEntry>> {
            Ok(Vec::new())
        }
    }

    fn actor() -> RequestActor {
        RequestActor {
            user_id: Some(UserId(3)),
            username: Some("rowan".into()),
            ip_address: Some("10.0.0.9".into()),
        }
    }

    #[tokio::test]
    async fn timestamp_comes_from_the_recorder_clock() {
        let repo = Arc::new(VecRepo::default());
        let recorder = AuditRecorder::new(repo.clone(), Arc::new(FixedClock));

        let entry = recorder
            .try_record(AuditRecord::new(actor(), AuditAction::Read, "patients"))
            .await
            .unwrap();

        assert_eq!(entry.timestamp, FixedClock.now());
        assert_eq!(entry.status, AuditStatus::Success);
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.9"));
    }

    #[tokio::test]
    async fn failed_outcome_is_recorded_with_error_details() {
        let repo = Arc::new(VecRepo::default());
        let recorder = AuditRecorder::new(repo.clone(), Arc::new(FixedClock));
        let outcome: ApplicationResult<i64> = Err(ApplicationError::not_found("patient not found"));

        recorder
            .record_outcome(
                AuditRecord::new(actor(), AuditAction::Update, "patients").with_resource_id(9),
                &outcome,
                |id| Some(*id),
            )
            .await;

        let rows = repo.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AuditStatus::Failed);
        assert_eq!(rows[0].resource_id, Some(9));
        assert!(rows[0].details.as_deref().unwrap().contains("patient not found"));
    }

    #[tokio::test]
    async fn successful_outcome_fills_in_the_created_id() {
        let repo = Arc::new(VecRepo::default());
        let recorder = AuditRecorder::new(repo.clone(), Arc::new(FixedClock));
        let outcome: ApplicationResult<i64> = Ok(41);

        recorder
            .record_outcome(
                AuditRecord::new(actor(), AuditAction::Create, "doctors"),
                &outcome,
                |id| Some(*id),
            )
            .await;

        assert_eq!(repo.rows.lock().unwrap()[0].resource_id, Some(41));
    }

    #[tokio::test]
    async fn write_failure_is_swallowed_by_record() {
        let recorder = AuditRecorder::new(Arc::new(BrokenRepo), Arc::new(FixedClock));
        let record = AuditRecord::new(actor(), AuditAction::Delete, "invoices");

        assert!(recorder.try_record(record.clone()).await.is_err());
        recorder.record(record).await;
    }
}
