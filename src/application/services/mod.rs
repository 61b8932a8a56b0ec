// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        audit::AuditRecorder,
        commands::users::UserCommandService,
        gate::AccessGate,
        ports::{
            health::ReadinessCheck,
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{audit::AuditQueryService, users::UserQueryService},
        records::{
            AdmissionService, AppointmentService, DoctorService, InvoiceService, PatientService,
            PrescriptionService, RecordAuditor,
        },
    },
    domain::{
        audit::AuditLogRepository,
        records::{
            AdmissionRepository, AppointmentRepository, DoctorRepository, InvoiceRepository,
            PatientRepository, PrescriptionRepository, RecordKind,
        },
        user::UserRepository,
    },
};

/// Storage ports for the six record collections.
#[derive(Clone)]
pub struct RecordRepositories {
    pub patients: Arc<dyn PatientRepository>,
    pub doctors: Arc<dyn DoctorRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub admissions: Arc<dyn AdmissionRepository>,
    pub prescriptions: Arc<dyn PrescriptionRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
}

pub struct ApplicationServices {
    pub gate: Arc<AccessGate>,
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub patients: Arc<PatientService>,
    pub doctors: Arc<DoctorService>,
    pub appointments: Arc<AppointmentService>,
    pub admissions: Arc<AdmissionService>,
    pub prescriptions: Arc<PrescriptionService>,
    pub invoices: Arc<InvoiceService>,
    audit: Arc<AuditRecorder>,
    readiness: Arc<dyn ReadinessCheck>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        records: RecordRepositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        readiness: Arc<dyn ReadinessCheck>,
    ) -> Self {
        let audit = Arc::new(AuditRecorder::new(audit_log_repo, Arc::clone(&clock)));
        let auditor = |kind| RecordAuditor::new(kind, Arc::clone(&audit));

        let gate = Arc::new(AccessGate::new(
            Arc::clone(&user_repo),
            Arc::clone(&token_manager),
        ));
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            password_hasher,
            token_manager,
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(user_repo, Arc::clone(&audit)));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit)));

        let patients = Arc::new(PatientService::new(
            Arc::clone(&records.patients),
            auditor(RecordKind::Patients),
            Arc::clone(&clock),
        ));
        let doctors = Arc::new(DoctorService::new(
            Arc::clone(&records.doctors),
            auditor(RecordKind::Doctors),
            Arc::clone(&clock),
        ));
        let appointments = Arc::new(AppointmentService::new(
            Arc::clone(&records.appointments),
            Arc::clone(&records.patients),
            Arc::clone(&records.doctors),
            auditor(RecordKind::Appointments),
        ));
        let admissions = Arc::new(AdmissionService::new(
            Arc::clone(&records.admissions),
            Arc::clone(&records.patients),
            Arc::clone(&records.doctors),
            auditor(RecordKind::Admissions),
            Arc::clone(&clock),
        ));
        let prescriptions = Arc::new(PrescriptionService::new(
            Arc::clone(&records.prescriptions),
            Arc::clone(&records.patients),
            Arc::clone(&records.doctors),
            Arc::clone(&records.appointments),
            auditor(RecordKind::Prescriptions),
            Arc::clone(&clock),
        ));
        let invoices = Arc::new(InvoiceService::new(
            Arc::clone(&records.invoices),
            Arc::clone(&records.patients),
            Arc::clone(&records.appointments),
            Arc::clone(&records.admissions),
            auditor(RecordKind::Invoices),
            clock,
        ));

        Self {
            gate,
            user_commands,
            user_queries,
            audit_queries,
            patients,
            doctors,
            appointments,
            admissions,
            prescriptions,
            invoices,
            audit,
            readiness,
        }
    }

    pub fn audit_recorder(&self) -> Arc<AuditRecorder> {
        Arc::clone(&self.audit)
    }

    pub fn readiness_check(&self) -> Arc<dyn ReadinessCheck> {
        Arc::clone(&self.readiness)
    }
}
