// src/domain/records/appointment.rs
use super::{RecordId, optional_text, text_enum};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

text_enum! {
    AppointmentStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
        NoShow => "no-show",
    }
}

const REASON_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl Appointment {
    pub fn apply(&mut self, changes: AppointmentChanges) {
        if let Some(patient_id) = changes.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = changes.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if changes.reason.is_some() {
            self.reason = changes.reason;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl NewAppointment {
    pub fn new(
        patient_id: RecordId,
        doctor_id: RecordId,
        scheduled_at: DateTime<Utc>,
        status: Option<AppointmentStatus>,
        reason: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            patient_id,
            doctor_id,
            scheduled_at,
            status: status.unwrap_or(AppointmentStatus::Scheduled),
            reason: optional_text("reason", reason, REASON_MAX)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
}

impl AppointmentChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        Ok(Self {
            reason: optional_text("reason", self.reason, REASON_MAX)?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.doctor_id.is_none()
            && self.scheduled_at.is_none()
            && self.status.is_none()
            && self.reason.is_none()
    }
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: NewAppointment) -> DomainResult<Appointment>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Appointment>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Appointment>>;

    async fn update(
        &self,
        id: RecordId,
        changes: AppointmentChanges,
    ) -> DomainResult<Option<Appointment>>;

    async fn delete(&self, id: RecordId) -> DomainResult<bool>;

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
