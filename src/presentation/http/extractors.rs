// src/presentation/http/extractors.rs
use crate::application::{audit::RequestActor, dto::AuthenticatedUser, error::ApplicationError};
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::{convert::Infallible, net::SocketAddr};

use super::{error::HttpError, state::HttpState};

/// The account the route gate resolved for this request.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "route is not behind the access gate",
                ))
            })
    }
}

/// Caller address as recorded in the audit trail: the socket peer, or the
/// first `X-Forwarded-For` hop when the deployment trusts its proxy.
#[derive(Debug, Clone, Default)]
pub struct ClientIp(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let trust_forwarded = parts
            .extensions
            .get::<HttpState>()
            .is_some_and(|state| state.trust_forwarded_for);

        if trust_forwarded {
            if let Some(hop) = first_forwarded_hop(&parts.headers) {
                return Ok(Self(Some(hop)));
            }
        }

        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string()),
        ))
    }
}

fn first_forwarded_hop(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Audit attribution for a guarded request.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: AuthenticatedUser,
    pub request: RequestActor,
}

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(user) = Authenticated::from_request_parts(parts, state).await?;
        let ClientIp(ip) = match ClientIp::from_request_parts(parts, state).await {
            Ok(ip) => ip,
            Err(never) => match never {},
        };
        let request = RequestActor::from_user(&user, ip);
        Ok(Self { user, request })
    }
}
