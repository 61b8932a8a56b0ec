use crate::domain::records::{
    Admission, AdmissionStatus, Appointment, AppointmentStatus, Doctor, Gender, Invoice, Patient,
    PaymentStatus, Prescription,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientDto {
    pub id: i64,
    pub full_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Patient> for PatientDto {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id.into(),
            full_name: p.full_name,
            dob: p.dob,
            gender: p.gender,
            phone: p.phone,
            address: p.address,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorDto {
    pub id: i64,
    pub full_name: String,
    pub speciality: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Doctor> for DoctorDto {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id.into(),
            full_name: d.full_name,
            speciality: d.speciality,
            phone: d.phone,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(with = "serde_time")]
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id.into(),
            patient_id: a.patient_id.into(),
            doctor_id: a.doctor_id.into(),
            scheduled_at: a.scheduled_at,
            status: a.status,
            reason: a.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdmissionDto {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(with = "serde_time")]
    pub admitted_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", default)]
    pub discharged_at: Option<DateTime<Utc>>,
    pub status: AdmissionStatus,
    pub reason: Option<String>,
}

impl From<Admission> for AdmissionDto {
    fn from(a: Admission) -> Self {
        Self {
            id: a.id.into(),
            patient_id: a.patient_id.into(),
            doctor_id: a.doctor_id.into(),
            admitted_at: a.admitted_at,
            discharged_at: a.discharged_at,
            status: a.status,
            reason: a.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionDto {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_id: Option<i64>,
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Prescription> for PrescriptionDto {
    fn from(p: Prescription) -> Self {
        Self {
            id: p.id.into(),
            patient_id: p.patient_id.into(),
            doctor_id: p.doctor_id.into(),
            appointment_id: p.appointment_id.map(Into::into),
            medication: p.medication,
            dosage: p.dosage,
            frequency: p.frequency,
            instructions: p.instructions,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub id: i64,
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub admission_id: Option<i64>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceDto {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id.into(),
            patient_id: i.patient_id.into(),
            appointment_id: i.appointment_id.map(Into::into),
            admission_id: i.admission_id.map(Into::into),
            amount: i.amount,
            payment_status: i.payment_status,
            issued_at: i.issued_at,
        }
    }
}

/// Body of a successful DELETE.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedDto {
    pub message: String,
}

impl DeletedDto {
    pub fn new(singular: &str) -> Self {
        let mut label = singular.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self {
            message: format!("{label} deleted"),
        }
    }
}
