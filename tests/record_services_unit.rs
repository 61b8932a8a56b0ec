// tests/record_services_unit.rs
use chrono::{Duration, TimeZone, Utc};
use hospital_core::application::{
    audit::RequestActor,
    error::ApplicationError,
    records::{
        CreateAdmissionCommand, CreateAppointmentCommand, CreateDoctorCommand,
        CreatePatientCommand, CreatePrescriptionCommand, ListRecordsQuery,
        UpdateAdmissionCommand, UpdatePatientCommand,
    },
};
use hospital_core::domain::{
    audit::{AuditAction, AuditStatus},
    errors::DomainError,
    records::{AdmissionStatus, AppointmentStatus},
};

mod support;
use support::TestApp;

fn actor() -> RequestActor {
    RequestActor::anonymous(Some("svc-test".into()), Some("127.0.0.1".into()))
}

fn patient(name: &str) -> CreatePatientCommand {
    CreatePatientCommand {
        full_name: name.into(),
        dob: None,
        gender: None,
        phone: None,
        address: None,
    }
}

fn doctor(name: &str) -> CreateDoctorCommand {
    CreateDoctorCommand {
        full_name: name.into(),
        speciality: Some("cardiology".into()),
        phone: None,
    }
}

fn not_found_message(err: &ApplicationError) -> Option<&str> {
    match err {
        ApplicationError::Domain(DomainError::NotFound(msg)) | ApplicationError::NotFound(msg) => {
            Some(msg.as_str())
        }
        _ => None,
    }
}

#[tokio::test]
async fn appointment_requires_existing_patient_and_doctor() {
    let app = TestApp::new();
    let services = &app.services;
    let p = services.patients.create(&actor(), patient("Pat")).await.unwrap();

    let scheduled_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let missing_patient = services
        .appointments
        .create(
            &actor(),
            CreateAppointmentCommand {
                patient_id: 77,
                doctor_id: 1,
                scheduled_at,
                status: None,
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(not_found_message(&missing_patient), Some("patient not found"));

    let missing_doctor = services
        .appointments
        .create(
            &actor(),
            CreateAppointmentCommand {
                patient_id: p.id,
                doctor_id: 77,
                scheduled_at,
                status: None,
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(not_found_message(&missing_doctor), Some("doctor not found"));

    let d = services.doctors.create(&actor(), doctor("Dr. Quinn")).await.unwrap();
    let appointment = services
        .appointments
        .create(
            &actor(),
            CreateAppointmentCommand {
                patient_id: p.id,
                doctor_id: d.id,
                scheduled_at,
                status: None,
                reason: Some("check-up".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn empty_patient_update_is_a_validation_error() {
    let app = TestApp::new();
    let p = app.services.patients.create(&actor(), patient("Still")).await.unwrap();

    let err = app
        .services
        .patients
        .update(&actor(), p.id, UpdatePatientCommand::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::Domain(DomainError::Validation(_))),
        "{err:?}"
    );
    let entry = app.audit.last();
    assert_eq!(entry.action, AuditAction::Update);
    assert_eq!(entry.status, AuditStatus::Failed);
    assert_eq!(entry.resource_id, Some(p.id));
}

#[tokio::test]
async fn blank_patient_name_is_rejected() {
    let app = TestApp::new();

    let err = app
        .services
        .patients
        .create(&actor(), patient("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::Validation(_))));
    assert_eq!(app.records.patients.len(), 0);
    assert_eq!(app.audit.last().status, AuditStatus::Failed);
}

#[tokio::test]
async fn delete_message_names_the_record_kind() {
    let app = TestApp::new();
    let p = app.services.patients.create(&actor(), patient("Gone")).await.unwrap();
    let d = app.services.doctors.create(&actor(), doctor("Dr. Gone")).await.unwrap();

    let deleted = app.services.patients.delete(&actor(), p.id).await.unwrap();
    assert_eq!(deleted.message, "Patient deleted");
    let deleted = app.services.doctors.delete(&actor(), d.id).await.unwrap();
    assert_eq!(deleted.message, "Doctor deleted");

    let err = app.services.patients.delete(&actor(), p.id).await.unwrap_err();
    assert_eq!(not_found_message(&err), Some("patient not found"));
}

#[tokio::test]
async fn admission_defaults_and_discharge_ordering() {
    let app = TestApp::new();
    let services = &app.services;
    let p = services.patients.create(&actor(), patient("Inpatient")).await.unwrap();
    let d = services.doctors.create(&actor(), doctor("Dr. Ward")).await.unwrap();
    let admitted_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

    let admission = services
        .admissions
        .create(
            &actor(),
            CreateAdmissionCommand {
                patient_id: p.id,
                doctor_id: d.id,
                admitted_at: Some(admitted_at),
                discharged_at: None,
                status: None,
                reason: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(admission.status, AdmissionStatus::Admitted);

    let backwards = services
        .admissions
        .update(
            &actor(),
            admission.id,
            UpdateAdmissionCommand {
                discharged_at: Some(admitted_at - Duration::hours(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(
        matches!(backwards, ApplicationError::Domain(DomainError::Validation(_))),
        "{backwards:?}"
    );
}

#[tokio::test]
async fn prescription_requires_a_medication() {
    let app = TestApp::new();
    let services = &app.services;
    let p = services.patients.create(&actor(), patient("Rx")).await.unwrap();
    let d = services.doctors.create(&actor(), doctor("Dr. Rx")).await.unwrap();

    let err = services
        .prescriptions
        .create(
            &actor(),
            CreatePrescriptionCommand {
                patient_id: p.id,
                doctor_id: d.id,
                appointment_id: None,
                medication: "".into(),
                dosage: None,
                frequency: None,
                instructions: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::Validation(_))));
    assert_eq!(app.records.prescriptions.len(), 0);
}

#[tokio::test]
async fn listing_pages_through_records() {
    let app = TestApp::new();
    for name in ["One", "Two", "Three"] {
        app.services.patients.create(&actor(), patient(name)).await.unwrap();
    }

    let page = app
        .services
        .patients
        .list(
            &actor(),
            ListRecordsQuery {
                skip: Some(1),
                limit: Some(1),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].full_name, "Two");
    assert_eq!(app.audit.last().resource_id, None);
}
