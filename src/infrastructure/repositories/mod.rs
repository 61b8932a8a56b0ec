// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_admission;
mod postgres_appointment;
mod postgres_audit_log;
mod postgres_doctor;
mod postgres_invoice;
mod postgres_patient;
mod postgres_prescription;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_admission::PostgresAdmissionRepository;
pub use postgres_appointment::PostgresAppointmentRepository;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_doctor::PostgresDoctorRepository;
pub use postgres_invoice::PostgresInvoiceRepository;
pub use postgres_patient::PostgresPatientRepository;
pub use postgres_prescription::PostgresPrescriptionRepository;
pub use postgres_user::PostgresUserRepository;

use crate::application::services::RecordRepositories;
use sqlx::PgPool;
use std::sync::Arc;

/// Postgres-backed ports for all six record tables, sharing one pool.
pub fn postgres_record_repositories(pool: &PgPool) -> RecordRepositories {
    RecordRepositories {
        patients: Arc::new(PostgresPatientRepository::new(pool.clone())),
        doctors: Arc::new(PostgresDoctorRepository::new(pool.clone())),
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        admissions: Arc::new(PostgresAdmissionRepository::new(pool.clone())),
        prescriptions: Arc::new(PostgresPrescriptionRepository::new(pool.clone())),
        invoices: Arc::new(PostgresInvoiceRepository::new(pool.clone())),
    }
}
