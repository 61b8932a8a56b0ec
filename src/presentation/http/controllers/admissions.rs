// src/presentation/http/controllers/admissions.rs
//! Inpatient stays. Restricted to the care team.
use crate::application::{
    dto::{DeletedDto, AdmissionDto},
    records::{CreateAdmissionCommand, ListRecordsQuery, UpdateAdmissionCommand},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Actor;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/admissions",
    request_body = CreateAdmissionCommand,
    responses(
        (status = 201, description = "Admission created.", body = AdmissionDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admissions"
)]
pub async fn create_admission(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreateAdmissionCommand>,
) -> HttpResult<(StatusCode, Json<AdmissionDto>)> {
    let created = state
        .services
        .admissions
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/admissions",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Admissions ordered by id.", body = [AdmissionDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admissions"
)]
pub async fn list_admissions(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<AdmissionDto>>> {
    state
        .services
        .admissions
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/admissions/{id}",
    params(("id" = i64, Path, description = "Admission id")),
    responses(
        (status = 200, description = "The admission.", body = AdmissionDto),
        (status = 404, description = "No such admission.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admissions"
)]
pub async fn get_admission(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<AdmissionDto>> {
    state
        .services
        .admissions
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/admissions/{id}",
    params(("id" = i64, Path, description = "Admission id")),
    request_body = UpdateAdmissionCommand,
    responses(
        (status = 200, description = "Admission updated.", body = AdmissionDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such admission.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admissions"
)]
pub async fn update_admission(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdateAdmissionCommand>,
) -> HttpResult<Json<AdmissionDto>> {
    state
        .services
        .admissions
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/admissions/{id}",
    params(("id" = i64, Path, description = "Admission id")),
    responses(
        (status = 200, description = "Admission deleted.", body = DeletedDto),
        (status = 404, description = "No such admission.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admissions"
)]
pub async fn delete_admission(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .admissions
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
