use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;

use super::{
    ListRecordsQuery, RecordAuditor, audit_target, optional_record_id, record_id, require_exists,
};
use crate::application::{
    audit::RequestActor,
    dto::{DeletedDto, PrescriptionDto},
    error::ApplicationResult,
    ports::time::Clock,
};
use crate::domain::{
    access::Operation,
    records::{
        AppointmentRepository, DoctorRepository, NewPrescription, PatientRepository,
        PrescriptionChanges, PrescriptionRepository, RecordKind,
    },
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrescriptionCommand {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_id: Option<i64>,
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePrescriptionCommand {
    pub appointment_id: Option<i64>,
    pub medication: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
}

pub struct PrescriptionService {
    repo: Arc<dyn PrescriptionRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    auditor: RecordAuditor,
    clock: Arc<dyn Clock>,
}

impl PrescriptionService {
    pub(crate) fn new(
        repo: Arc<dyn PrescriptionRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        auditor: RecordAuditor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            patients,
            doctors,
            appointments,
            auditor,
            clock,
        }
    }

    pub async fn create(
        &self,
        actor: &RequestActor,
        command: CreatePrescriptionCommand,
    ) -> ApplicationResult<PrescriptionDto> {
        let details = format!(
            "{} for patient {}",
            command.medication.trim(),
            command.patient_id
        );
        let outcome: ApplicationResult<PrescriptionDto> = async {
            let patient_id = record_id(command.patient_id)?;
            let doctor_id = record_id(command.doctor_id)?;
            let appointment_id = optional_record_id(command.appointment_id)?;
            require_exists(RecordKind::Patients, patient_id, self.patients.exists(patient_id))
                .await?;
            require_exists(RecordKind::Doctors, doctor_id, self.doctors.exists(doctor_id)).await?;
            if let Some(appointment_id) = appointment_id {
                require_exists(
                    RecordKind::Appointments,
                    appointment_id,
                    self.appointments.exists(appointment_id),
                )
                .await?;
            }

            let new = NewPrescription::new(
                patient_id,
                doctor_id,
                appointment_id,
                command.medication,
                command.dosage,
                command.frequency,
                command.instructions,
                self.clock.now(),
            )?;
            Ok(PrescriptionDto::from(self.repo.insert(new).await?))
        }
        .await;
        self.auditor
            .finish(actor, Operation::Create, None, Some(details), outcome, |p| p.id)
            .await
    }

    pub async fn get(&self, actor: &RequestActor, id: i64) -> ApplicationResult<PrescriptionDto> {
        let outcome: ApplicationResult<PrescriptionDto> = async {
            self.repo
                .find_by_id(record_id(id)?)
                .await?
                .map(PrescriptionDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Get, audit_target(id), None, outcome, |p| p.id)
            .await
    }

    pub async fn list(
        &self,
        actor: &RequestActor,
        query: ListRecordsQuery,
    ) -> ApplicationResult<Vec<PrescriptionDto>> {
        let (skip, limit) = query.window();
        let outcome: ApplicationResult<Vec<PrescriptionDto>> = async {
            let rows = self.repo.list(skip, limit).await?;
            Ok(rows.into_iter().map(PrescriptionDto::from).collect())
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
        command: UpdatePrescriptionCommand,
    ) -> ApplicationResult<PrescriptionDto> {
        let outcome: ApplicationResult<PrescriptionDto> = async {
            let changes = PrescriptionChanges {
                appointment_id: optional_record_id(command.appointment_id)?,
                medication: command.medication,
                dosage: command.dosage,
                frequency: command.frequency,
                instructions: command.instructions,
            }
            .validated()?;
            if let Some(appointment_id) = changes.appointment_id {
                require_exists(
                    RecordKind::Appointments,
                    appointment_id,
                    self.appointments.exists(appointment_id),
                )
                .await?;
            }
            self.repo
                .update(record_id(id)?, changes)
                .await?
                .map(PrescriptionDto::from)
                .ok_or_else(|| self.auditor.kind().not_found().into())
        }
        .await;
        self.auditor
            .finish(actor, Operation::Update, audit_target(id), None, outcome, |p| p.id)
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
