// tests/e2e_audit_trail.rs
use axum::http::StatusCode;
use hospital_core::domain::{
    audit::{AuditAction, AuditStatus},
    user::Role,
};
use serde_json::json;

mod support;
use support::{TestApp, assert_error};

async fn create_patient(app: &TestApp, token: &str, name: &str) -> i64 {
    let response = app
        .post_json(
            "/patients",
            Some(token),
            json!({ "full_name": name, "gender": "female", "phone": "555-0100-2233" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "body: {}", response.body);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn each_record_operation_leaves_exactly_one_entry() {
    let app = TestApp::new();
    let clerk = app.seed_user("clerk", Role::Receptionist).await;
    let token = app.token_for(&clerk).await;

    let id = create_patient(&app, &token, "Ada Lovelace").await;
    assert_eq!(app.audit.len(), 1);
    let created = app.audit.last();
    assert_eq!(created.action, AuditAction::Create);
    assert_eq!(created.resource, "patients");
    assert_eq!(created.resource_id, Some(id));
    assert_eq!(created.user_id, Some(clerk.id));
    assert_eq!(created.status, AuditStatus::Success);

    let fetched = app.get(&format!("/patients/{id}"), Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["full_name"], "Ada Lovelace");
    assert_eq!(app.audit.len(), 2);
    assert_eq!(app.audit.last().action, AuditAction::Read);
    assert_eq!(app.audit.last().resource_id, Some(id));

    let listed = app.get("/patients", Some(&token)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    assert_eq!(app.audit.len(), 3);
    assert_eq!(app.audit.last().action, AuditAction::Read);
    assert_eq!(app.audit.last().resource_id, None);

    let updated = app
        .put_json(&format!("/patients/{id}"), Some(&token), json!({ "address": "12 Analytical Way" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["address"], "12 Analytical Way");
    assert_eq!(updated.body["full_name"], "Ada Lovelace");
    assert_eq!(app.audit.len(), 4);
    assert_eq!(app.audit.last().action, AuditAction::Update);
}

#[tokio::test]
async fn phone_numbers_are_masked_in_audit_details() {
    let app = TestApp::new();
    let token = app.login_as("clerk", Role::Receptionist).await;

    create_patient(&app, &token, "Grace Hopper").await;

    let details = app.audit.last().details.unwrap_or_default();
    assert!(details.contains("2233"), "{details}");
    assert!(!details.contains("555-0100"), "{details}");
}

#[tokio::test]
async fn missing_record_is_404_and_audited_as_failed() {
    let app = TestApp::new();
    let token = app.login_as("dr.house", Role::Doctor).await;

    let response = app.get("/patients/999", Some(&token)).await;

    assert_error(&response, StatusCode::NOT_FOUND, "Not Found");
    assert_eq!(response.body["message"], "patient not found");
    let entry = app.audit.last();
    assert_eq!(entry.action, AuditAction::Read);
    assert_eq!(entry.status, AuditStatus::Failed);
    assert_eq!(entry.resource_id, Some(999));
}

#[tokio::test]
async fn appointment_for_unknown_patient_is_rejected_and_audited() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let doctor = app
        .post_json("/doctors", Some(&admin), json!({ "full_name": "Dr. Strange" }))
        .await;
    let doctor_id = doctor.body["id"].as_i64().unwrap();

    let response = app
        .post_json(
            "/appointments",
            Some(&admin),
            json!({ "patient_id": 42, "doctor_id": doctor_id, "scheduled_at": "2024-02-01T09:30:00Z" }),
        )
        .await;

    assert_error(&response, StatusCode::NOT_FOUND, "Not Found");
    assert_eq!(response.body["message"], "patient not found");
    assert_eq!(app.records.appointments.len(), 0);
    let entry = app.audit.last();
    assert_eq!(entry.resource, "appointments");
    assert_eq!(entry.status, AuditStatus::Failed);
}

#[tokio::test]
async fn delete_reports_the_record_kind() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let id = create_patient(&app, &admin, "Temp Patient").await;

    let deleted = app.delete(&format!("/patients/{id}"), Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Patient deleted");
    assert_eq!(app.audit.last().action, AuditAction::Delete);
    assert_eq!(app.audit.last().resource_id, Some(id));

    let again = app.delete(&format!("/patients/{id}"), Some(&admin)).await;
    assert_error(&again, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn empty_update_is_a_bad_request() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let id = create_patient(&app, &admin, "Unchanged").await;

    let response = app.put_json(&format!("/patients/{id}"), Some(&admin), json!({})).await;

    assert_error(&response, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(app.audit.last().status, AuditStatus::Failed);
}

#[tokio::test]
async fn invoices_reject_non_positive_amounts() {
    let app = TestApp::new();
    let clerk = app.login_as("clerk", Role::Receptionist).await;
    let patient = create_patient(&app, &clerk, "Billable").await;

    let zero = app
        .post_json("/invoices", Some(&clerk), json!({ "patient_id": patient, "amount": 0.0 }))
        .await;
    assert_error(&zero, StatusCode::BAD_REQUEST, "Bad Request");

    let ok = app
        .post_json("/invoices", Some(&clerk), json!({ "patient_id": patient, "amount": 120.5 }))
        .await;
    assert_eq!(ok.status, StatusCode::CREATED, "body: {}", ok.body);
    assert_eq!(ok.body["payment_status"], "unpaid");
}

#[tokio::test]
async fn admin_reads_the_trail_newest_first_with_filters() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let clerk = app.login_as("clerk", Role::Receptionist).await;
    create_patient(&app, &clerk, "First").await;
    app.get("/doctors", Some(&clerk)).await;
    create_patient(&app, &clerk, "Second").await;

    let page = app.get("/auth/audit-logs?resource=patients", Some(&admin)).await;
    assert_eq!(page.status, StatusCode::OK, "body: {}", page.body);
    let rows = page.body.as_array().unwrap().clone();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["resource"] == "patients"));
    assert!(rows[0]["id"].as_i64() > rows[1]["id"].as_i64());

    let reads = app.get("/auth/audit-logs?action=READ", Some(&admin)).await;
    let reads = reads.body.as_array().unwrap().clone();
    let resources: Vec<&str> = reads.iter().filter_map(|row| row["resource"].as_str()).collect();
    assert_eq!(resources, vec!["audit_logs", "doctors"]);

    let viewing = app.audit.last();
    assert_eq!(viewing.resource, "audit_logs");
    assert_eq!(viewing.action, AuditAction::Read);
}

#[tokio::test]
async fn earlier_entries_never_change() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let id = create_patient(&app, &admin, "Stable").await;
    let before = app.audit.entries();

    app.put_json(&format!("/patients/{id}"), Some(&admin), json!({ "full_name": "Renamed" }))
        .await;
    app.delete(&format!("/patients/{id}"), Some(&admin)).await;

    let after = app.audit.entries();
    assert_eq!(after.len(), before.len() + 2);
    assert_eq!(&after[..before.len()], &before[..]);
}

#[tokio::test]
async fn audit_outage_does_not_fail_the_request() {
    let app = TestApp::with_failing_audit();
    let token = app.login_as("clerk", Role::Receptionist).await;

    let response = app
        .post_json("/patients", Some(&token), json!({ "full_name": "Resilient" }))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(app.records.patients.len(), 1);
    assert_eq!(app.audit.len(), 0);
}
