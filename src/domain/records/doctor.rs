// src/domain/records/doctor.rs
use super::{RecordId, optional_text, required_text};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const NAME_MAX: usize = 150;
const SPECIALITY_MAX: usize = 100;
const PHONE_MAX: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: RecordId,
    pub full_name: String,
    pub speciality: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    pub fn apply(&mut self, changes: DoctorChanges) {
        if let Some(full_name) = changes.full_name {
            self.full_name = full_name;
        }
        if changes.speciality.is_some() {
            self.speciality = changes.speciality;
        }
        if changes.phone.is_some() {
            self.phone = changes.phone;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub full_name: String,
    pub speciality: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewDoctor {
    pub fn new(
        full_name: String,
        speciality: Option<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            full_name: required_text("full_name", full_name, NAME_MAX)?,
            speciality: optional_text("speciality", speciality, SPECIALITY_MAX)?,
            phone: optional_text("phone", phone, PHONE_MAX)?,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DoctorChanges {
    pub full_name: Option<String>,
    pub speciality: Option<String>,
    pub phone: Option<String>,
}

impl DoctorChanges {
    pub fn validated(self) -> DomainResult<Self> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields to update"));
        }
        Ok(Self {
            full_name: self
                .full_name
                .map(|name| required_text("full_name", name, NAME_MAX))
                .transpose()?,
            speciality: optional_text("speciality", self.speciality, SPECIALITY_MAX)?,
            phone: optional_text("phone", self.phone, PHONE_MAX)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.speciality.is_none() && self.phone.is_none()
    }
}

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn insert(&self, doctor: NewDoctor) -> DomainResult<Doctor>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Doctor>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<Doctor>>;

    async fn update(&self, id: RecordId, changes: DoctorChanges) -> DomainResult<Option<Doctor>>;

    async fn delete(&self, id: RecordId) -> DomainResult<bool>;

    async fn exists(&self, id: RecordId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
