// src/presentation/http/controllers/doctors.rs
use crate::application::{
    dto::{DeletedDto, DoctorDto},
    records::{CreateDoctorCommand, ListRecordsQuery, UpdateDoctorCommand},
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
    path = "/doctors",
    request_body = CreateDoctorCommand,
    responses(
        (status = 201, description = "Doctor created.", body = DoctorDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Doctors"
)]
pub async fn create_doctor(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreateDoctorCommand>,
) -> HttpResult<(StatusCode, Json<DoctorDto>)> {
    let created = state
        .services
        .doctors
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Doctors ordered by id.", body = [DoctorDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Doctors"
)]
pub async fn list_doctors(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<DoctorDto>>> {
    state
        .services
        .doctors
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor.", body = DoctorDto),
        (status = 404, description = "No such doctor.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Doctors"
)]
pub async fn get_doctor(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DoctorDto>> {
    state
        .services
        .doctors
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    request_body = UpdateDoctorCommand,
    responses(
        (status = 200, description = "Doctor updated.", body = DoctorDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such doctor.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Doctors"
)]
pub async fn update_doctor(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdateDoctorCommand>,
) -> HttpResult<Json<DoctorDto>> {
    state
        .services
        .doctors
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor deleted.", body = DeletedDto),
        (status = 404, description = "No such doctor.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Doctors"
)]
pub async fn delete_doctor(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .doctors
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
