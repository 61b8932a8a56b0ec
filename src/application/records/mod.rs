// src/application/records/mod.rs
//! CRUD services for the clinical and billing records. Each call runs the
//! business operation and then appends exactly one audit entry describing it.
mod admissions;
mod appointments;
mod doctors;
mod invoices;
mod patients;
mod prescriptions;

use std::sync::Arc;

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::application::{
    audit::{AuditRecord, AuditRecorder, RequestActor},
    error::ApplicationResult,
    queries::normalize_limit,
};
use crate::domain::{
    access::Operation,
    audit::AuditAction,
    errors::DomainResult,
    records::{RecordId, RecordKind},
};

pub use admissions::{AdmissionService, CreateAdmissionCommand, UpdateAdmissionCommand};
pub use appointments::{AppointmentService, CreateAppointmentCommand, UpdateAppointmentCommand};
pub use doctors::{CreateDoctorCommand, DoctorService, UpdateDoctorCommand};
pub use invoices::{CreateInvoiceCommand, InvoiceService, UpdateInvoiceCommand};
pub use patients::{CreatePatientCommand, PatientService, UpdatePatientCommand};
pub use prescriptions::{
    CreatePrescriptionCommand, PrescriptionService, UpdatePrescriptionCommand,
};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecordsQuery {
    /// Rows to skip.
    pub skip: Option<u32>,
    /// Page size, 50 by default and at most 1000.
    pub limit: Option<u32>,
}

impl ListRecordsQuery {
    fn window(self) -> (u32, u32) {
        (
            self.skip.unwrap_or(0),
            normalize_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
        )
    }
}

fn audit_action(operation: Operation) -> AuditAction {
    match operation {
        Operation::List | Operation::Get => AuditAction::Read,
        Operation::Create => AuditAction::Create,
        Operation::Update => AuditAction::Update,
        Operation::Delete => AuditAction::Delete,
    }
}

/// Ties one record kind to the shared audit recorder.
#[derive(Clone)]
pub(crate) struct RecordAuditor {
    kind: RecordKind,
    recorder: Arc<AuditRecorder>,
}

impl RecordAuditor {
    pub(crate) fn new(kind: RecordKind, recorder: Arc<AuditRecorder>) -> Self {
        Self { kind, recorder }
    }

    /// Record `outcome` and hand it back unchanged. `target` is the id named
    /// in the request; for creates the new id is taken from the result.
    pub(crate) async fn finish<T>(
        &self,
        actor: &RequestActor,
        operation: Operation,
        target: Option<RecordId>,
        details: Option<String>,
        outcome: ApplicationResult<T>,
        created_id: impl FnOnce(&T) -> i64,
    ) -> ApplicationResult<T> {
        let mut record = AuditRecord::new(actor.clone(), audit_action(operation), self.kind.as_str());
        if let Some(id) = target {
            record = record.with_resource_id(id);
        }
        if let Some(details) = details {
            record = record.with_details(details);
        }
        let is_create = operation == Operation::Create;
        self.recorder
            .record_outcome(record, &outcome, |value| {
                is_create.then(|| created_id(value))
            })
            .await;
        outcome
    }

    pub(crate) fn kind(&self) -> RecordKind {
        self.kind
    }
}

/// Fail with "<kind> not found" unless `exists` says otherwise.
pub(crate) async fn require_exists<F>(kind: RecordKind, id: RecordId, exists: F) -> ApplicationResult<()>
where
    F: std::future::Future<Output = DomainResult<bool>>,
{
    if exists.await? {
        Ok(())
    } else {
        Err(kind.not_found().into())
    }
}

pub(crate) fn record_id(raw: i64) -> ApplicationResult<RecordId> {
    Ok(RecordId::new(raw)?)
}

pub(crate) fn optional_record_id(raw: Option<i64>) -> ApplicationResult<Option<RecordId>> {
    raw.map(record_id).transpose()
}

/// Target id for the audit entry; malformed ids are still rejected by the
/// operation itself.
fn audit_target(raw: i64) -> Option<RecordId> {
    RecordId::new(raw).ok()
}
