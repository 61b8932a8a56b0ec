// src/domain/records/mod.rs
/// Closed text enumeration stored as TEXT and serialized as its wire name.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::errors::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::domain::errors::DomainError::Validation(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}
pub(crate) use text_enum;

pub mod admission;
pub mod appointment;
pub mod doctor;
pub mod invoice;
pub mod masking;
pub mod patient;
pub mod prescription;

use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

pub use admission::{Admission, AdmissionChanges, AdmissionRepository, AdmissionStatus, NewAdmission};
pub use appointment::{
    Appointment, AppointmentChanges, AppointmentRepository, AppointmentStatus, NewAppointment,
};
pub use doctor::{Doctor, DoctorChanges, DoctorRepository, NewDoctor};
pub use invoice::{Invoice, InvoiceChanges, InvoiceRepository, NewInvoice, PaymentStatus};
pub use patient::{Gender, NewPatient, Patient, PatientChanges, PatientRepository};
pub use prescription::{NewPrescription, Prescription, PrescriptionChanges, PrescriptionRepository};
pub use masking::mask_sensitive;

/// Primary key of a clinical or billing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("record id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six record collections. The wire name doubles as the audit resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Patients,
    Doctors,
    Appointments,
    Admissions,
    Prescriptions,
    Invoices,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Patients,
        RecordKind::Doctors,
        RecordKind::Appointments,
        RecordKind::Admissions,
        RecordKind::Prescriptions,
        RecordKind::Invoices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Patients => "patients",
            RecordKind::Doctors => "doctors",
            RecordKind::Appointments => "appointments",
            RecordKind::Admissions => "admissions",
            RecordKind::Prescriptions => "prescriptions",
            RecordKind::Invoices => "invoices",
        }
    }

    /// Singular label used in messages, e.g. "patient not found".
    pub fn singular(&self) -> &'static str {
        match self {
            RecordKind::Patients => "patient",
            RecordKind::Doctors => "doctor",
            RecordKind::Appointments => "appointment",
            RecordKind::Admissions => "admission",
            RecordKind::Prescriptions => "prescription",
            RecordKind::Invoices => "invoice",
        }
    }

    pub fn not_found(&self) -> DomainError {
        DomainError::NotFound(format!("{} not found", self.singular()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject blank required text and over-long values.
pub(crate) fn required_text(field: &str, value: String, max_len: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    bounded_text(field, trimmed.to_string(), max_len)
}

pub(crate) fn bounded_text(field: &str, value: String, max_len: usize) -> DomainResult<String> {
    if value.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_len} characters long"
        )));
    }
    Ok(value)
}

pub(crate) fn optional_text(
    field: &str,
    value: Option<String>,
    max_len: usize,
) -> DomainResult<Option<String>> {
    value.map(|v| bounded_text(field, v, max_len)).transpose()
}

