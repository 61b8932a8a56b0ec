// src/presentation/http/controllers/prescriptions.rs
use crate::application::{
    dto::{DeletedDto, PrescriptionDto},
    records::{CreatePrescriptionCommand, ListRecordsQuery, UpdatePrescriptionCommand},
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
    path = "/prescriptions",
    request_body = CreatePrescriptionCommand,
    responses(
        (status = 201, description = "Prescription created.", body = PrescriptionDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Prescriptions"
)]
pub async fn create_prescription(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreatePrescriptionCommand>,
) -> HttpResult<(StatusCode, Json<PrescriptionDto>)> {
    let created = state
        .services
        .prescriptions
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/prescriptions",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Prescriptions ordered by id.", body = [PrescriptionDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Prescriptions"
)]
pub async fn list_prescriptions(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<PrescriptionDto>>> {
    state
        .services
        .prescriptions
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}",
    params(("id" = i64, Path, description = "Prescription id")),
    responses(
        (status = 200, description = "The prescription.", body = PrescriptionDto),
        (status = 404, description = "No such prescription.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Prescriptions"
)]
pub async fn get_prescription(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<PrescriptionDto>> {
    state
        .services
        .prescriptions
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/prescriptions/{id}",
    params(("id" = i64, Path, description = "Prescription id")),
    request_body = UpdatePrescriptionCommand,
    responses(
        (status = 200, description = "Prescription updated.", body = PrescriptionDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such prescription.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Prescriptions"
)]
pub async fn update_prescription(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdatePrescriptionCommand>,
) -> HttpResult<Json<PrescriptionDto>> {
    state
        .services
        .prescriptions
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/prescriptions/{id}",
    params(("id" = i64, Path, description = "Prescription id")),
    responses(
        (status = 200, description = "Prescription deleted.", body = DeletedDto),
        (status = 404, description = "No such prescription.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Prescriptions"
)]
pub async fn delete_prescription(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .prescriptions
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
