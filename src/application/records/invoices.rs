use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;

use super::{
    ListRecordsQuery, RecordAuditor, audit_target, optional_record_id, record_id, require_exists,
};
use crate::application::{
    audit::RequestActor,
    dto::{DeletedDto, InvoiceDto},
    error::ApplicationResult,
    ports::time::Clock,
};
use crate::domain::{
    access::Operation,
    records::{
        AdmissionRepository, AppointmentRepository, InvoiceChanges, InvoiceRepository,
        NewInvoice, PatientRepository, PaymentStatus, RecordId, RecordKind,
    },
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInvoiceCommand {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub admission_id: Option<i64>,
    pub amount: f64,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateInvoiceCommand {
    pub appointment_id: Option<i64>,
    pub admission_id: Option<i64>,
    pub amount: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
}

pub struct InvoiceService {
    repo: Arc<dyn InvoiceRepository>,
    patients: Arc<dyn PatientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    admissions: Arc<dyn AdmissionRepository>,
    auditor: RecordAuditor,
    clock: Arc<dyn Clock>,
}

impl InvoiceService {
    pub(crate) fn new(
        repo: Arc<dyn InvoiceRepository>,
        patients: Arc<dyn PatientRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        admissions: Arc<dyn AdmissionRepository>,
        auditor: RecordAuditor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            patients,
            appointments,
            admissions,
            auditor,
            clock,
        }
    }

    async fn check_links(
        &self,
        appointment_id: Option<RecordId>,
        admission_id: Option<RecordId>,
    ) -> ApplicationResult<()> {
        if let Some(id) = appointment_id {
            require_exists(RecordKind::Appointments, id, self.appointments.exists(id)).await?;
        }
        if let Some(id) = admission_id {
            require_exists(RecordKind::Admissions, id, self.admissions.exists(id)).await?;
        }
        Ok(())
    }

    pub async fn create(
        &self,
        actor: &RequestActor,
        command: CreateInvoiceCommand,
    ) -> ApplicationResult<InvoiceDto> {
        let details = format!(
            "amount {:.2} for patient {}",
            command.amount, command.patient_id
        );
        let outcome: ApplicationResult<InvoiceDto> = async {
            let patient_id = record_id(command.patient_id)?;
            let appointment_id = optional_record_id(command.appointment_id)?;
            let admission_id = optional_record_id(command.admission_id)?;
            require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                .await?;
            self.check_links(appointment_id, admission_id).await?;

            let new = NewInvoice::new(
                patient_id,
                appointment_id,
                admission_id,
                command.amount,
                command.payment_status,
                self.clock.now(),
            )?;
            Ok(InvoiceDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, Some(details), outcome, |i| i.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<InvoiceDto> {
        let outcome: ApplicationResult<InvoiceDto> = async {
            self.repo
                .find_by_id(record_id(id)?)
                .await?
                .map(InvoiceDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Get, audit_target(id), None, outcome, |i| i.id)
            .await
    }

    pub async fn list(
        &self,
        actor: &RequestActor,
        query: ListRecordsQuery,
    ) -> ApplicationResult<Vec<InvoiceDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<InvoiceDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(InvoiceDto::from).collect())
        }
        .await;
        self.auditor
            .finish(actor, Operation::List, None, None, outcome, |_| 0)
            .await
    }

    pub async fn update(
        &self,
        actor: &RequestActor,
        id: i64,
        command: UpdateInvoiceCommand,
    ) -> ApplicationResult<InvoiceDto> {
        let details = command
            .payment_status
            .map(|status| format!("payment status {status}"));
        let outcome: ApplicationResult<InvoiceDto> = async {
            let changes = InvoiceChanges {
                appointment_id: optional_record_id(command.appointment_id)?,
                admission_id: optional_record_id(command.admission_id)?,
                amount: command.amount,
                payment_status: command.payment_status,
            }
            .validated()?;
            self.check_links(changes.appointment_id, changes.admission_id)
                .await?;
            self.repo
                .update(record_id(id)?, changes)
                .await?
                .map(InvoiceDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Update, audit_target(id), details, outcome, |i| i.id)
            .await
    }

    pub async fn delete(&self, actor: &RequestActor, id: i64) -> ApplicationResult<DeletedDto> {
        let kind = self.auditor.kind();
        let outcome: ApplicationResult<DeletedDto> = async {
            if self.repo.delete(record_id(id)?).await? {
                Ok(DeletedDto::new(kind.singular()))
            } else {
                Err(kind.not_found().into())
            }
        }
        .await;
        self.auditor
            .finish(actor, Operation::Delete, audit_target(id), None, outcome, |_| 0)
            .await
    }
}
