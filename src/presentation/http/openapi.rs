// src/presentation/http/openapi.rs
use crate::presentation::http::controllers::{
    admissions, appointments, audit, auth, doctors, health, invoices, patients, prescriptions,
};
use axum::Router;
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        health::liveness,
        health::readiness,
        auth::login,
        auth::register,
        auth::me,
        auth::list_users,
        auth::update_user,
        audit::list_audit_logs,
        patients::create_patient,
        patients::list_patients,
        patients::get_patient,
        patients::update_patient,
        patients::delete_patient,
        doctors::create_doctor,
        doctors::list_doctors,
        doctors::get_doctor,
        doctors::update_doctor,
        doctors::delete_doctor,
        appointments::create_appointment,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::delete_appointment,
        admissions::create_admission,
        admissions::list_admissions,
        admissions::get_admission,
        admissions::update_admission,
        admissions::delete_admission,
        prescriptions::create_prescription,
        prescriptions::list_prescriptions,
        prescriptions::get_prescription,
        prescriptions::update_prescription,
        prescriptions::delete_prescription,
        invoices::create_invoice,
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::update_invoice,
        invoices::delete_invoice
    ),
    components(
        schemas(
            health::StatusResponse,
            health::ServiceInfo,
            crate::presentation::http::error::ErrorResponse,
            auth::LoginForm,
            auth::RegisterRequest,
            auth::UpdateUserRequest,
            crate::application::dto::TokenResponse,
            crate::application::dto::UserDto,
            crate::application::dto::AuditLogDto,
            crate::application::dto::PatientDto,
            crate::application::dto::DoctorDto,
            crate::application::dto::AppointmentDto,
            crate::application::dto::AdmissionDto,
            crate::application::dto::PrescriptionDto,
            crate::application::dto::InvoiceDto,
            crate::application::dto::DeletedDto,
            crate::application::records::CreatePatientCommand,
            crate::application::records::UpdatePatientCommand,
            crate::application::records::CreateDoctorCommand,
            crate::application::records::UpdateDoctorCommand,
            crate::application::records::CreateAppointmentCommand,
            crate::application::records::UpdateAppointmentCommand,
            crate::application::records::CreateAdmissionCommand,
            crate::application::records::UpdateAdmissionCommand,
            crate::application::records::CreatePrescriptionCommand,
            crate::application::records::UpdatePrescriptionCommand,
            crate::application::records::CreateInvoiceCommand,
            crate::application::records::UpdateInvoiceCommand,
            crate::domain::user::Role,
            crate::domain::audit::AuditAction,
            crate::domain::audit::AuditStatus
        )
    ),
    tags(
        (name = "Auth", description = "Login and staff account administration"),
        (name = "Audit", description = "Append-only access trail"),
        (name = "Patients", description = "Patient registry"),
        (name = "Doctors", description = "Doctor directory"),
        (name = "Appointments", description = "Outpatient scheduling"),
        (name = "Admissions", description = "Inpatient stays"),
        (name = "Prescriptions", description = "Medication orders"),
        (name = "Invoices", description = "Billing"),
        (name = "System", description = "Health and readiness")
    ),
    modifiers(&BearerScheme),
    info(
        title = "Hospital Records API",
        description = "Hospital back-office records with role-based access and an audit trail",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerScheme;

impl Modify for BearerScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// Swagger UI at `/docs`, ReDoc at `/redoc`, raw document at `/openapi.json`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let redoc = Redoc::with_url("/redoc", openapi.clone());
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", openapi))
        .merge(redoc)
}
