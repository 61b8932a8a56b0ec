use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{
    ListRecordsQuery, RecordAuditor, audit_target, optional_record_id, record_id, require_exists,
};
use crate::application::{
    audit::RequestActor,
    dto::{AppointmentDto, DeletedDto},
    error::ApplicationResult,
};
use crate::domain::{
    access::Operation,
    records::{
        AppointmentChanges, AppointmentRepository, AppointmentStatus, DoctorRepository,
        NewAppointment, PatientRepository, RecordKind,
    },
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAppointmentCommand {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAppointmentCommand {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
}

pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    auditor: RecordAuditor,
}

impl AppointmentService {
    pub(crate) fn new(
        repo: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        auditor: RecordAuditor,
    ) -> Self {
        Self {
            repo,
            patients,
            doctors,
            auditor,
        }
    }

    pub async fn create(
        &self,
        actor: &RequestActor,
        command: CreateAppointmentCommand,
    ) -> ApplicationResult<AppointmentDto> {
        let details = format!(
            "patient {} with doctor {}",
            command.patient_id, command.doctor_id
        );
        let outcome: ApplicationResult<AppointmentDto> = async {
            let patient_id = record_id(command.patient_id)?;
            let doctor_id = record_id(command.doctor_id)?;
            require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                .await?;
            require_exists(RecordKind::Doctors, doctor_id, self.doctors.exists(doctor_id)).await?;

            let new = NewAppointment::new(
                patient_id,
                doctor_id,
                command.scheduled_at,
                command.status,
                command.reason,
            )?;
            Ok(AppointmentDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, Some(details), outcome, |a| a.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<AppointmentDto> {
        let outcome: ApplicationResult<AppointmentDto> = async {
            self.repo
                .find_by_id(record_id(id)?)
                .await?
                .map(AppointmentDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Get, audit_target(id), None, outcome, |a| a.id)
            .await
    }

    pub async fn list(
        &self,
        actor: &RequestActor,
        query: ListRecordsQuery,
    ) -> ApplicationResult<Vec<AppointmentDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<AppointmentDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(AppointmentDto::from).collect())
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
        command: UpdateAppointmentCommand,
    ) -> ApplicationResult<AppointmentDto> {
        let details = command.status.map(|status| format!("status {status}"));
        let outcome: ApplicationResult<AppointmentDto> = async {
            let changes = AppointmentChanges {
                patient_id: optional_record_id(command.patient_id)?,
                doctor_id: optional_record_id(command.doctor_id)?,
                scheduled_at: command.scheduled_at,
                status: command.status,
                reason: command.reason,
            }
            .validated()?;
            if let Some(patient_id) = changes.patient_id {
                require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                    .await?;
            }
            if let Some(doctor_id) = changes.doctor_id {
                require_exists(RecordKind::Doctors, doctor_id, self.doctors.exists(doctor_id))
                    .await?;
            }
            self.repo
                .update(record_id(id)?, changes)
                .await?
                .map(AppointmentDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Update, audit_target(id), details, outcome, |a| a.id)
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
