// tests/support/mocks/audit.rs
use async_trait::async_trait;
use hospital_core::domain::{
    audit::{AuditEntry, AuditLogFilter, AuditLogRepository, NewAuditEntry},
    errors::{DomainError, DomainResult},
};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryAuditRepo {
    rows: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditRepo {
    /// Every entry in insertion order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn last(&self) -> AuditEntry {
        self.rows
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("audit trail is empty")
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditRepo {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        let mut rows = self.rows.lock().unwrap();
        let stored = entry.into_entry(rows.len() as i64 + 1);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>> {
        let mut rows: Vec<AuditEntry> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }
}

/// Audit store that rejects every write.
#[derive(Default)]
pub struct FailingAuditRepo;

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        Err(DomainError::Persistence("audit table is read-only".into()))
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
