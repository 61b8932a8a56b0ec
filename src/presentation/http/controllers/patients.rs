// src/presentation/http/controllers/patients.rs
//! Front desk registers patients; clinical staff read them.
use crate::application::{
    dto::{DeletedDto, PatientDto},
    records::{CreatePatientCommand, ListRecordsQuery, UpdatePatientCommand},
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
    path = "/patients",
    request_body = CreatePatientCommand,
    responses(
        (status = 201, description = "Patient created.", body = PatientDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Patients"
)]
pub async fn create_patient(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreatePatientCommand>,
) -> HttpResult<(StatusCode, Json<PatientDto>)> {
    let created = state
        .services
        .patients
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/patients",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Patients ordered by id.", body = [PatientDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Patients"
)]
pub async fn list_patients(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<PatientDto>>> {
    state
        .services
        .patients
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient.", body = PatientDto),
        (status = 404, description = "No such patient.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Patients"
)]
pub async fn get_patient(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<PatientDto>> {
    state
        .services
        .patients
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    request_body = UpdatePatientCommand,
    responses(
        (status = 200, description = "Patient updated.", body = PatientDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such patient.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Patients"
)]
pub async fn update_patient(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdatePatientCommand>,
) -> HttpResult<Json<PatientDto>> {
    state
        .services
        .patients
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient deleted.", body = DeletedDto),
        (status = 404, description = "No such patient.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Patients"
)]
pub async fn delete_patient(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .patients
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
