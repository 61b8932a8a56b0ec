// src/presentation/http/controllers/audit.rs
use crate::application::dto::AuditLogDto;
use crate::application::queries::audit::ListAuditLogsQuery;
use crate::domain::audit::AuditAction;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Actor;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditLogParams {
    pub skip: Option<u32>,
    /// 100 by default, at most 500.
    pub limit: Option<u32>,
    pub user_id: Option<i64>,
    /// e.g. `patients`, `auth`, `users`.
    pub resource: Option<String>,
    pub action: Option<AuditAction>,
}

#[utoipa::path(
    get,
    path = "/auth/audit-logs",
    params(AuditLogParams),
    responses(
        (status = 200, description = "Audit entries, newest first.", body = [AuditLogDto]),
        (status = 403, description = "Caller is not an administrator.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(params): Query<AuditLogParams>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let query = ListAuditLogsQuery {
        skip: params.skip,
        limit: params.limit,
        user_id: params.user_id,
        resource: params.resource,
        action: params.action,
    };

    state
        .services
        .audit_queries
        .list_audit_logs(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}
