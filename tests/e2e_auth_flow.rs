// tests/e2e_auth_flow.rs
use axum::http::{StatusCode, header};
use hospital_core::domain::{
    audit::{AuditAction, AuditStatus},
    user::Role,
};
use serde_json::json;

mod support;
use support::{PASSWORD, PEER_IP, TestApp, assert_error, login_request};

#[tokio::test]
async fn admin_logs_in_registers_a_nurse_and_the_nurse_can_log_in() {
    let app = TestApp::new();
    app.seed_user("chief", Role::Admin).await;

    let login = app.login("chief", PASSWORD).await;
    assert_eq!(login.status, StatusCode::OK, "body: {}", login.body);
    assert_eq!(login.body["token_type"], "bearer");
    assert_eq!(login.body["expires_in"], 480 * 60);
    let admin_token = login.body["access_token"].as_str().unwrap().to_string();

    let created = app
        .post_json(
            "/auth/register",
            Some(&admin_token),
            json!({
                "username": "nurse.joy",
                "email": "joy@hospital.test",
                "password": "night-shift-42",
                "role": "nurse",
                "full_name": "Joy Hart"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "body: {}", created.body);
    assert_eq!(created.body["role"], "nurse");
    assert_eq!(created.body["is_active"], true);
    assert!(created.body.get("password_hash").is_none());

    let nurse_login = app.login("nurse.joy", "night-shift-42").await;
    assert_eq!(nurse_login.status, StatusCode::OK);
    let nurse_token = nurse_login.body["access_token"].as_str().unwrap();

    let me = app.get("/auth/me", Some(nurse_token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "nurse.joy");
    assert_eq!(me.body["full_name"], "Joy Hart");
}

#[tokio::test]
async fn non_admin_cannot_register_accounts() {
    let app = TestApp::new();
    let token = app.login_as("dr.house", Role::Doctor).await;

    let response = app
        .post_json(
            "/auth/register",
            Some(&token),
            json!({
                "username": "intruder",
                "email": "intruder@hospital.test",
                "password": "long-enough-pw",
                "role": "admin"
            }),
        )
        .await;

    assert_error(&response, StatusCode::FORBIDDEN, "Forbidden");
    assert!(app.users.get("intruder").is_none());
}

#[tokio::test]
async fn successful_login_updates_last_login_and_is_audited() {
    let app = TestApp::new();
    let user = app.seed_user("reception1", Role::Receptionist).await;

    let response = app.login("reception1", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(app.users.get("reception1").unwrap().last_login.is_some());
    let entry = app.audit.last();
    assert_eq!(entry.action, AuditAction::Login);
    assert_eq!(entry.resource, "auth");
    assert_eq!(entry.status, AuditStatus::Success);
    assert_eq!(entry.user_id, Some(user.id));
    assert_eq!(entry.resource_id, Some(i64::from(user.id)));
    assert_eq!(entry.ip_address.as_deref(), Some(PEER_IP));
}

#[tokio::test]
async fn wrong_password_is_401_with_challenge_and_audited_without_actor() {
    let app = TestApp::new();
    app.seed_user("dr.grey", Role::Doctor).await;

    let response = app.login("dr.grey", "not-the-password").await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Unauthorized");
    assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(app.audit.len(), 1);
    let entry = app.audit.last();
    assert_eq!(entry.action, AuditAction::Login);
    assert_eq!(entry.status, AuditStatus::Failed);
    assert_eq!(entry.user_id, None);
    assert_eq!(entry.username.as_deref(), Some("dr.grey"));
    assert!(app.users.get("dr.grey").unwrap().last_login.is_none());
}

#[tokio::test]
async fn unknown_user_and_wrong_password_look_identical() {
    let app = TestApp::new();
    app.seed_user("dr.grey", Role::Doctor).await;

    let unknown = app.login("nobody", PASSWORD).await;
    let wrong = app.login("dr.grey", "not-the-password").await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
    let failed = app
        .audit
        .entries()
        .into_iter()
        .filter(|e| e.status == AuditStatus::Failed && e.user_id.is_none())
        .count();
    assert_eq!(failed, 2);
}

#[tokio::test]
async fn inactive_account_cannot_log_in() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    let nurse = app.seed_user("nurse.off", Role::Nurse).await;

    let deactivated = app
        .put_json(
            &format!("/auth/users/{}", i64::from(nurse.id)),
            Some(&admin),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(deactivated.status, StatusCode::OK);
    assert_eq!(deactivated.body["is_active"], false);

    let response = app.login("nurse.off", PASSWORD).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Unauthorized");
    let entry = app.audit.last();
    assert_eq!(entry.status, AuditStatus::Failed);
    assert_eq!(entry.user_id, None);
}

#[tokio::test]
async fn register_rejects_short_passwords_and_duplicates() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;

    let short = app
        .post_json(
            "/auth/register",
            Some(&admin),
            json!({ "username": "newbie", "email": "n@hospital.test", "password": "short", "role": "nurse" }),
        )
        .await;
    assert_error(&short, StatusCode::BAD_REQUEST, "Bad Request");

    let duplicate = app
        .post_json(
            "/auth/register",
            Some(&admin),
            json!({ "username": "chief", "email": "other@hospital.test", "password": "long-enough-pw", "role": "nurse" }),
        )
        .await;
    assert_error(&duplicate, StatusCode::CONFLICT, "Conflict");
}

#[tokio::test]
async fn admin_lists_users_with_paging() {
    let app = TestApp::new();
    let admin = app.login_as("chief", Role::Admin).await;
    app.seed_user("a.nurse", Role::Nurse).await;
    app.seed_user("b.nurse", Role::Nurse).await;

    let all = app.get("/auth/users", Some(&admin)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let page = app.get("/auth/users?skip=1&limit=1", Some(&admin)).await;
    let page = page.body.as_array().unwrap().clone();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["username"], "a.nurse");
}

#[tokio::test]
async fn forwarded_for_header_cannot_spoof_the_recorded_address() {
    let app = TestApp::new();
    app.seed_user("dr.grey", Role::Doctor).await;

    let mut request = login_request("dr.grey", "not-the-password");
    request
        .headers_mut()
        .insert("x-forwarded-for", "1.2.3.4, 10.0.0.1".parse().unwrap());
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.audit.last().ip_address.as_deref(), Some(PEER_IP));
}

#[tokio::test]
async fn trusted_proxy_hop_is_recorded_when_configured() {
    let app = TestApp::behind_trusted_proxy();
    app.seed_user("dr.grey", Role::Doctor).await;

    let mut request = login_request("dr.grey", PASSWORD);
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.audit.last().ip_address.as_deref(), Some("203.0.113.7"));

    app.login("dr.grey", PASSWORD).await;
    assert_eq!(app.audit.last().ip_address.as_deref(), Some(PEER_IP));
}
