// src/presentation/http/controllers/health.rs
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub docs: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner.", body = ServiceInfo)),
    tag = "System"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Hospital Records API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        docs: "/docs".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up.", body = StatusResponse)),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}

#[utoipa::path(
    get,
    path = "/health/liveness",
    responses((status = 200, description = "Process is alive.", body = StatusResponse)),
    tag = "System"
)]
pub async fn liveness() -> Json<StatusResponse> {
    Json(StatusResponse::new("alive"))
}

#[utoipa::path(
    get,
    path = "/health/readiness",
    responses(
        (status = 200, description = "Database reachable.", body = StatusResponse),
        (status = 503, description = "Database unreachable.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn readiness(
    Extension(state): Extension<HttpState>,
) -> (StatusCode, Json<StatusResponse>) {
    match state.services.readiness_check().ping().await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::new("ready"))),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse::new("unavailable")),
            )
        }
    }
}
