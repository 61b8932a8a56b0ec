// tests/user_command_service_unit.rs
use hospital_core::application::{
    audit::RequestActor,
    commands::users::{BootstrapAdminCommand, BootstrapOutcome, RegisterUserCommand, UpdateUserCommand},
    error::ApplicationError,
};
use hospital_core::domain::{
    audit::{AuditAction, AuditStatus},
    errors::DomainError,
    user::Role,
};

mod support;
use support::TestApp;

fn admin_actor(app_user: &hospital_core::domain::user::User) -> RequestActor {
    RequestActor {
        user_id: Some(app_user.id),
        username: Some(app_user.username.to_string()),
        ip_address: Some("10.1.1.1".into()),
    }
}

fn register(username: &str, email: &str, password: &str) -> RegisterUserCommand {
    RegisterUserCommand {
        username: username.into(),
        email: email.into(),
        password: password.into(),
        role: Role::Nurse,
        full_name: None,
    }
}

#[tokio::test]
async fn duplicate_username_is_a_conflict_and_audited_as_failed() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;
    let actor = admin_actor(&admin);
    let service = &app.services.user_commands;

    service
        .register(&actor, register("nurse.a", "a@hospital.test", "long-enough-pw"))
        .await
        .unwrap();
    let err = service
        .register(&actor, register("nurse.a", "b@hospital.test", "long-enough-pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict(_)), "{err:?}");
    let entry = app.audit.last();
    assert_eq!(entry.action, AuditAction::Create);
    assert_eq!(entry.resource, "users");
    assert_eq!(entry.status, AuditStatus::Failed);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;

    let err = app
        .services
        .user_commands
        .register(
            &admin_actor(&admin),
            register("someone", "chief@hospital.test", "long-enough-pw"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn short_password_and_bad_email_are_validation_errors() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;
    let actor = admin_actor(&admin);
    let service = &app.services.user_commands;

    let short = service
        .register(&actor, register("nurse.b", "b@hospital.test", "short"))
        .await
        .unwrap_err();
    assert!(matches!(short, ApplicationError::Validation(_)), "{short:?}");

    let email = service
        .register(&actor, register("nurse.c", "not-an-email", "long-enough-pw"))
        .await
        .unwrap_err();
    assert!(
        matches!(email, ApplicationError::Domain(DomainError::Validation(_))),
        "{email:?}"
    );
    assert!(app.users.get("nurse.b").is_none());
    assert!(app.users.get("nurse.c").is_none());
}

#[tokio::test]
async fn registered_password_is_hashed_before_storage() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;

    app.services
        .user_commands
        .register(
            &admin_actor(&admin),
            register("nurse.d", "d@hospital.test", "long-enough-pw"),
        )
        .await
        .unwrap();

    let stored = app.users.get("nurse.d").unwrap();
    assert_ne!(stored.password_hash.as_str(), "long-enough-pw");
}

#[tokio::test]
async fn ensure_admin_is_idempotent() {
    let app = TestApp::new();
    let command = || BootstrapAdminCommand {
        username: "root".into(),
        email: "root@hospital.test".into(),
        password: "first-admin-pw".into(),
        full_name: Some("Site Administrator".into()),
    };

    let first = app.services.user_commands.ensure_admin(command()).await.unwrap();
    let second = app.services.user_commands.ensure_admin(command()).await.unwrap();

    match first {
        BootstrapOutcome::Created(user) => assert_eq!(user.role, Role::Admin),
        other => panic!("expected a new admin, got {other:?}"),
    }
    assert!(matches!(second, BootstrapOutcome::AlreadyExists));
    assert_eq!(app.audit.len(), 1);
    assert_eq!(app.audit.last().username.as_deref(), Some("system"));
}

#[tokio::test]
async fn ensure_admin_does_nothing_once_any_admin_exists() {
    let app = TestApp::new();
    app.seed_user("chief", Role::Admin).await;

    let outcome = app
        .services
        .user_commands
        .ensure_admin(BootstrapAdminCommand {
            username: "second.root".into(),
            email: "second@hospital.test".into(),
            password: "another-admin-pw".into(),
            full_name: None,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, BootstrapOutcome::AlreadyExists));
    assert!(app.users.get("second.root").is_none());
    assert_eq!(app.audit.len(), 0);
}

#[tokio::test]
async fn ensure_admin_ignores_non_admin_accounts() {
    let app = TestApp::new();
    app.seed_user("nurse.first", Role::Nurse).await;

    let outcome = app
        .services
        .user_commands
        .ensure_admin(BootstrapAdminCommand {
            username: "root".into(),
            email: "root@hospital.test".into(),
            password: "first-admin-pw".into(),
            full_name: None,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, BootstrapOutcome::Created(_)));
}

#[tokio::test]
async fn update_with_nothing_to_change_is_rejected() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;
    let nurse = app.seed_user("nurse.e", Role::Nurse).await;

    let err = app
        .services
        .user_commands
        .update_user(
            &admin_actor(&admin),
            UpdateUserCommand {
                user_id: nurse.id.into(),
                email: None,
                full_name: None,
                role: None,
                is_active: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)), "{err:?}");
    assert_eq!(app.audit.last().resource_id, Some(i64::from(nurse.id)));
}

#[tokio::test]
async fn update_of_unknown_user_is_not_found() {
    let app = TestApp::new();
    let admin = app.seed_user("chief", Role::Admin).await;

    let err = app
        .services
        .user_commands
        .update_user(
            &admin_actor(&admin),
            UpdateUserCommand {
                user_id: 404,
                email: None,
                full_name: None,
                role: Some(Role::Doctor),
                is_active: None,
            },
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::Domain(DomainError::NotFound(_))),
        "{err:?}"
    );
}
