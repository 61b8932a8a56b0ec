use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{
    ListRecordsQuery, RecordAuditor, audit_target, optional_record_id, record_id, require_exists,
};
use crate::application::{
    audit::RequestActor,
    dto::{AdmissionDto, DeletedDto},
    error::ApplicationResult,
    ports::time::Clock,
};
use crate::domain::{
    access::Operation,
    records::{
        AdmissionChanges, AdmissionRepository, AdmissionStatus, DoctorRepository, NewAdmission,
        PatientRepository, RecordKind,
    },
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAdmissionCommand {
    pub patient_id: i64,
    pub doctor_id: i64,
    /// Defaults to the time of the request.
    pub admitted_at: Option<DateTime<Utc>>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: Option<AdmissionStatus>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAdmissionCommand {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub admitted_at: Option<DateTime<Utc>>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: Option<AdmissionStatus>,
    pub reason: Option<String>,
}

pub struct AdmissionService {
    repo: Arc<dyn AdmissionRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    auditor: RecordAuditor,
    clock: Arc<dyn Clock>,
}

impl AdmissionService {
    pub(crate) fn new(
        repo: Arc<dyn AdmissionRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        auditor: RecordAuditor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            patients,
            doctors,
            auditor,
            clock,
        }
    }

    pub async fn create(
        &self,
        actor: &RequestActor,
        command: CreateAdmissionCommand,
    ) -> ApplicationResult<AdmissionDto> {
        let details = format!(
            "admit patient {} under doctor {}",
            command.patient_id, command.doctor_id
        );
        let outcome: ApplicationResult<AdmissionDto> = async {
            let patient_id = record_id(command.patient_id)?;
            let doctor_id = record_id(command.doctor_id)?;
            require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                .await?;
            require_exists(RecordKind::Doctors, doctor_id, self.doctors.exists(doctor_id)).await?;

            let new = NewAdmission::new(
                patient_id,
                doctor_id,
                command.admitted_at.unwrap_or_else(|| self.clock.now()),
                command.discharged_at,
                command.status,
                command.reason,
            )?;
            Ok(AdmissionDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, Some(details), outcome, |a| a.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<AdmissionDto> {
        let outcome: ApplicationResult<AdmissionDto> = async {
            self.repo
                .find_by_id(record_id(id)?)
                .await?
                .map(AdmissionDto::from)
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
    ) -> ApplicationResult<Vec<AdmissionDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<AdmissionDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(AdmissionDto::from).collect())
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
        command: UpdateAdmissionCommand,
    ) -> ApplicationResult<AdmissionDto> {
        let details = command.status.map(|status| format!("status {status}"));
        let outcome: ApplicationResult<AdmissionDto> = async {
            let changes = AdmissionChanges {
                patient_id: optional_record_id(command.patient_id)?,
                doctor_id: optional_record_id(command.doctor_id)?,
                admitted_at: command.admitted_at,
                discharged_at: command.discharged_at,
                status: command.status,
                reason: command.reason,
            }
            .validated()?;
            let id = record_id(id)?;
            if changes.admitted_at.is_some() || changes.discharged_at.is_some() {
                let current = self
                    .repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| self.auditor.kind().not_found())?;
                current.check_timeline(&changes)?;
            }
            if let Some(patient_id) = changes.patient_id {
                require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                    .await?;
            }
            if let Some(doctor_id) = changes.doctor_id {
                require_exists(RecordKind::Doctors, doctor_id, self.doctors.exists(doctor_id))
                    .await?;
            }
            self.repo
                .update(id, changes)
                .await?
                .map(AdmissionDto::from)
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
