// src/presentation/http/controllers/appointments.rs
use crate::application::{
    dto::{DeletedDto, AppointmentDto},
    records::{CreateAppointmentCommand, ListRecordsQuery, UpdateAppointmentCommand},
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
    path = "/appointments",
    request_body = CreateAppointmentCommand,
    responses(
        (status = 201, description = "Appointment created.", body = AppointmentDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Appointments"
)]
pub async fn create_appointment(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreateAppointmentCommand>,
) -> HttpResult<(StatusCode, Json<AppointmentDto>)> {
    let created = state
        .services
        .appointments
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/appointments",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Appointments ordered by id.", body = [AppointmentDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Appointments"
)]
pub async fn list_appointments(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<AppointmentDto>>> {
    state
        .services
        .appointments
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment.", body = AppointmentDto),
        (status = 404, description = "No such appointment.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Appointments"
)]
pub async fn get_appointment(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<AppointmentDto>> {
    state
        .services
        .appointments
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment id")),
    request_body = UpdateAppointmentCommand,
    responses(
        (status = 200, description = "Appointment updated.", body = AppointmentDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such appointment.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Appointments"
)]
pub async fn update_appointment(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdateAppointmentCommand>,
) -> HttpResult<Json<AppointmentDto>> {
    state
        .services
        .appointments
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted.", body = DeletedDto),
        (status = 404, description = "No such appointment.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Appointments"
)]
pub async fn delete_appointment(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .appointments
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
