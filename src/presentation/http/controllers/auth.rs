// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{LoginUserCommand, RegisterUserCommand, UpdateUserCommand},
    dto::{TokenResponse, UserDto},
    queries::users::ListUsersQuery,
};
use crate::domain::user::Role;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Actor, ClientIp};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    /// At least 8 characters.
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    pub skip: Option<u32>,
    /// 100 by default, at most 500.
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Bearer token issued.", body = TokenResponse),
        (status = 401, description = "Unknown user, wrong password or inactive account.", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    ClientIp(ip): ClientIp,
    Form(form): Form<LoginForm>,
) -> HttpResult<Json<TokenResponse>> {
    let command = LoginUserCommand {
        username: form.username,
        password: form.password,
    };

    state
        .services
        .user_commands
        .login(command, ip)
        .await
        .into_http()
        .map(|token| Json(TokenResponse::from(token)))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created.", body = UserDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator.", body = ErrorResponse),
        (status = 409, description = "Username or email already registered.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = RegisterUserCommand {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        full_name: payload.full_name,
    };

    let user = state
        .services
        .user_commands
        .register(&actor.request, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The caller's account.", body = UserDto),
        (status = 401, description = "Missing, invalid or expired token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn me(Extension(state): Extension<HttpState>, actor: Actor) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .current_user(&actor.request, &actor.user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/auth/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Accounts ordered by id.", body = [UserDto]),
        (status = 403, description = "Caller is not an administrator.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn list_users(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Query(params): Query<ListUsersParams>,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_users(
            &actor.request,
            ListUsersQuery {
                skip: params.skip,
                limit: params.limit,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/auth/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated.", body = UserDto),
        (status = 404, description = "No such user.", body = ErrorResponse),
        (status = 409, description = "Email already registered.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        email: payload.email,
        full_name: payload.full_name,
        role: payload.role,
        is_active: payload.is_active,
    };

    state
        .services
        .user_commands
        .update_user(&actor.request, command)
        .await
        .into_http()
        .map(Json)
}
