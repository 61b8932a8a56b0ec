// src/domain/records/admission.rs
use super::{RecordId, optional_text, text_enum};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

text_enum! {
    AdmissionStatus {
        Admitted => "admitted",
        Discharged => "discharged",
    }
}

const REASON_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub admitted_at: DateTime<Utc>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: AdmissionStatus,
    pub reason: Option<String>,
}

impl Admission {
    pub fn apply(&mut self, changes: AdmissionChanges) {
        if let Some(patient_id) = changes.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = changes.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(admitted_at) = changes.admitted_at {
            self.admitted_at = admitted_at;
        }
        if changes.discharged_at.is_some() {
            self.discharged_at = changes.discharged_at;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if changes.reason.is_some() {
            self.reason = changes.reason;
        }
    }

    /// Check the stay's timeline as it would look after `changes`.
    pub fn check_timeline(&self, changes: &AdmissionChanges) -> DomainResult<()> {
        let admitted_at = changes.admitted_at.unwrap_or(self.admitted_at);
        check_discharge(admitted_at, changes.discharged_at.or(self.discharged_at))
    }
}

#[derive(Debug, Clone)]
pub struct NewAdmission {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub admitted_at: DateTime<Utc>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: AdmissionStatus,
    pub reason: Option<String>,
}

impl NewAdmission {
    pub fn new(
        patient_id: RecordId,
        doctor_id: RecordId,
        admitted_at: DateTime<Utc>,
        discharged_at: Option<DateTime<Utc>>,
        status: Option<AdmissionStatus>,
        reason: Option<String>,
    ) -> DomainResult<Self> {
        check_discharge(admitted_at, discharged_at)?;
        Ok(Self {
            patient_id,
            doctor_id,
            admitted_at,
            discharged_at,
            status: status.unwrap_or(AdmissionStatus::Admitted),
            reason: optional_text("reason", reason, REASON_MAX)?,
        })
    }
}

fn check_discharge(
    admitted_at: DateTime<Utc>,
    discharged_at: Option<DateTime<Utc>>,
) -> DomainResult<()> {
    match discharged_at {
        Some(discharged) if discharged < admitted_at => Err(DomainError::validation(
            "discharged_at cannot be earlier than admitted_at",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdmissionChanges {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub admitted_at: Option<DateTime<Utc>>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: Option<AdmissionStatus>,
    pub reason: Option<String>,
}

impl AdmissionChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        if let Some(admitted_at) = self.admitted_at {
            check_discharge(admitted_at, self.discharged_at)?;
        }
        Ok(Self {
            reason: optional_text("reason", self.reason, REASON_MAX)?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.doctor_id.is_none()
            && self.admitted_at.is_none()
            && self.discharged_at.is_none()
            && self.status.is_none()
            && self.reason.is_none()
    }
}

#[async_trait]
pub trait AdmissionRepository: Send + Sync {
    async fn insert(&self, admission: NewAdmission) -> DomainResult<Admission>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Admission>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Admission>>;

    async fn update(
        &self,
        id: RecordId,
        changes: AdmissionChanges,
    ) -> DomainResult<Option<Admission>>;

    async fn delete(&self, id: RecordId) -> DomainResult<bool>;

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
