// src/presentation/http/controllers/invoices.rs
//! Billing. Clinical roles have no access.
use crate::application::{
    dto::{DeletedDto, InvoiceDto},
    records::{CreateInvoiceCommand, ListRecordsQuery, UpdateInvoiceCommand},
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
    path = "/invoices",
    request_body = CreateInvoiceCommand,
    responses(
        (status = 201, description = "Invoice created.", body = InvoiceDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Invoices"
)]
pub async fn create_invoice(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(command): Json<CreateInvoiceCommand>,
) -> HttpResult<(StatusCode, Json<InvoiceDto>)> {
    let created = state
        .services
        .invoices
        .create(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/invoices",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "Invoices ordered by id.", body = [InvoiceDto]),
        (status = 403, description = "Role not permitted.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Invoices"
)]
pub async fn list_invoices(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(query): Query<ListRecordsQuery>,
) -> HttpResult<Json<Vec<InvoiceDto>>> {
    state
        .services
        .invoices
        .list(&actor.request, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "The invoice.", body = InvoiceDto),
        (status = 404, description = "No such invoice.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Invoices"
)]
pub async fn get_invoice(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<InvoiceDto>> {
    state
        .services
        .invoices
        .get(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/invoices/{id}",
    params(("id" = i64, Path, description = "Invoice id")),
    request_body = UpdateInvoiceCommand,
    responses(
        (status = 200, description = "Invoice updated.", body = InvoiceDto),
        (status = 400, description = "Invalid or empty change set.", body = ErrorResponse),
        (status = 404, description = "No such invoice.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Invoices"
)]
pub async fn update_invoice(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(command): Json<UpdateInvoiceCommand>,
) -> HttpResult<Json<InvoiceDto>> {
    state
        .services
        .invoices
        .update(&actor.request, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice deleted.", body = DeletedDto),
        (status = 404, description = "No such invoice.", body = ErrorResponse),
        (status = 409, description = "Still referenced by other records.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedDto>> {
    state
        .services
        .invoices
        .delete(&actor.request, id)
        .await
        .into_http()
        .map(Json)
}
