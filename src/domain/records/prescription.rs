// src/domain/records/prescription.rs
use super::{RecordId, optional_text, required_text};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const MEDICATION_MAX: usize = 200;
const DOSAGE_MAX: usize = 100;
const FREQUENCY_MAX: usize = 100;
const INSTRUCTIONS_MAX: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub appointment_id: Option<RecordId>,
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    pub fn apply(&mut self, changes: PrescriptionChanges) {
        if let Some(medication) = changes.medication {
            self.medication = medication;
        }
        if changes.appointment_id.is_some() {
            self.appointment_id = changes.appointment_id;
        }
        if changes.dosage.is_some() {
            self.dosage = changes.dosage;
        }
        if changes.frequency.is_some() {
            self.frequency = changes.frequency;
        }
        if changes.instructions.is_some() {
            self.instructions = changes.instructions;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPrescription {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub appointment_id: Option<RecordId>,
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewPrescription {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        patient_id: RecordId,
        doctor_id: RecordId,
        appointment_id: Option<RecordId>,
        medication: String,
        dosage: Option<String>,
        frequency: Option<String>,
        instructions: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            patient_id,
            doctor_id,
            appointment_id,
            medication: required_text("medication", medication, MEDICATION_MAX)?,
            dosage: optional_text("dosage", dosage, DOSAGE_MAX)?,
            frequency: optional_text("frequency", frequency, FREQUENCY_MAX)?,
            instructions: optional_text("instructions", instructions, INSTRUCTIONS_MAX)?,
            created_at,
        })
    }
}

/// Patient and prescriber are fixed once written.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionChanges {
    pub appointment_id: Option<RecordId>,
    pub medication: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
}

impl PrescriptionChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        Ok(Self {
            appointment_id: self.appointment_id,
            medication: self
                .medication
                .map(|m| required_text("medication", m, MEDICATION_MAX))
                .transpose()?,
            dosage: optional_text("dosage", self.dosage, DOSAGE_MAX)?,
            frequency: optional_text("frequency", self.frequency, FREQUENCY_MAX)?,
            instructions: optional_text("instructions", self.instructions, INSTRUCTIONS_MAX)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.appointment_id.is_none()
            && self.medication.is_none()
            && self.dosage.is_none()
            && self.frequency.is_none()
            && self.instructions.is_none()
    }
}

#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    async fn insert(&self, prescription: NewPrescription) -> DomainResult<Prescription>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Prescription>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Prescription>>;

    async fn update(
        &self,
        id: RecordId,
        changes: PrescriptionChanges,
    ) -> DomainResult<Option<Prescription>>;

    async fn delete(&self, id: RecordId) -> DomainResult<bool>;
}
