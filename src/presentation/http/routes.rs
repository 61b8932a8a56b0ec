// src/presentation/http/routes.rs
use crate::domain::access::{Operation, Route};
use crate::domain::records::RecordKind;
use crate::presentation::http::controllers::{
    admissions, appointments, audit, auth, doctors, health, invoices, patients, prescriptions,
};
use crate::presentation::http::middleware::guarded;
use crate::presentation::http::{openapi, state::HttpState};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// `/<kind>` and `/<kind>/{id}`, each method behind its own policy.
macro_rules! record_routes {
    ($router:expr, $kind:expr, $module:ident, $create:ident, $list:ident, $get:ident, $update:ident, $delete:ident) => {{
        let kind: RecordKind = $kind;
        let collection = format!("/{}", kind.as_str());
        let item = format!("/{}/{{id}}", kind.as_str());
        $router
            .route(
                &collection,
                guarded(Route::Record(kind, Operation::List), get($module::$list))
                    .merge(guarded(Route::Record(kind, Operation::Create), post($module::$create))),
            )
            .route(
                &item,
                guarded(Route::Record(kind, Operation::Get), get($module::$get))
                    .merge(guarded(Route::Record(kind, Operation::Update), put($module::$update)))
                    .merge(guarded(Route::Record(kind, Operation::Delete), delete($module::$delete))),
            )
    }};
}

pub fn build_router(state: HttpState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    let router = Router::new()
        .merge(openapi::docs_router())
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/liveness", get(health::liveness))
        .route("/health/readiness", get(health::readiness))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", guarded(Route::Register, post(auth::register)))
        .route("/auth/me", guarded(Route::CurrentUser, get(auth::me)))
        .route("/auth/users", guarded(Route::ListUsers, get(auth::list_users)))
        .route("/auth/users/{id}", guarded(Route::UpdateUser, put(auth::update_user)))
        .route(
            "/auth/audit-logs",
            guarded(Route::ListAuditLogs, get(audit::list_audit_logs)),
        );

    let router = record_routes!(router, RecordKind::Patients, patients,
        create_patient, list_patients, get_patient, update_patient, delete_patient);
    let router = record_routes!(router, RecordKind::Doctors, doctors,
        create_doctor, list_doctors, get_doctor, update_doctor, delete_doctor);
    let router = record_routes!(router, RecordKind::Appointments, appointments,
        create_appointment, list_appointments, get_appointment, update_appointment, delete_appointment);
    let router = record_routes!(router, RecordKind::Admissions, admissions,
        create_admission, list_admissions, get_admission, update_admission, delete_admission);
    let router = record_routes!(router, RecordKind::Prescriptions, prescriptions,
        create_prescription, list_prescriptions, get_prescription, update_prescription, delete_prescription);
    let router = record_routes!(router, RecordKind::Invoices, invoices,
        create_invoice, list_invoices, get_invoice, update_invoice, delete_invoice);

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
