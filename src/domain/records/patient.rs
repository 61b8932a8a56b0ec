// src/domain/records/patient.rs
use super::{RecordId, optional_text, required_text, text_enum};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

text_enum! {
    Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

const NAME_MAX: usize = 150;
const PHONE_MAX: usize = 20;
const ADDRESS_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: RecordId,
    pub full_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn apply(&mut self, changes: PatientChanges) {
        if let Some(full_name) = changes.full_name {
            self.full_name = full_name;
        }
        if changes.dob.is_some() {
            self.dob = changes.dob;
        }
        if changes.gender.is_some() {
            self.gender = changes.gender;
        }
        if changes.phone.is_some() {
            self.phone = changes.phone;
        }
        if changes.address.is_some() {
            self.address = changes.address;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub full_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewPatient {
    pub fn new(
        full_name: String,
        dob: Option<NaiveDate>,
        gender: Option<Gender>,
        phone: Option<String>,
        address: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            full_name: required_text("full_name", full_name, NAME_MAX)?,
            dob,
            gender,
            phone: optional_text("phone", phone, PHONE_MAX)?,
            address: optional_text("address", address, ADDRESS_MAX)?,
            created_at,
        })
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PatientChanges {
    pub full_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl PatientChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        Ok(Self {
            full_name: self
                .full_name
                .map(|name| required_text("full_name", name, NAME_MAX))
                .transpose()?,
            dob: self.dob,
            gender: self.gender,
            phone: optional_text("phone", self.phone, PHONE_MAX)?,
            address: optional_text("address", self.address, ADDRESS_MAX)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.dob.is_none()
            && self.gender.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn insert(&self, patient: NewPatient) -> DomainResult<Patient>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Patient>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Patient>>;

    async fn update(&self, id: RecordId, changes: PatientChanges)
    -> DomainResult<Option<Patient>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: RecordId) -> DomainResult<bool>;

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
