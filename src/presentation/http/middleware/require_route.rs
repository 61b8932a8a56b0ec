// src/presentation/http/middleware/require_route.rs
use crate::application::error::ApplicationError;
use crate::domain::access::Route;
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

/// Run the access gate for `route` and hand the resolved account to the
/// handler through request extensions. Rejections end the request here and
/// are not audited.
pub async fn require_route(route: Route, mut req: Request, next: Next) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
        .into_response();
    };

    let bearer = req.headers().typed_get::<Authorization<Bearer>>();
    let token = bearer.as_ref().map(|header| header.token());

    match state.services.gate.authorize_request(token, route).await {
        Ok(user) => {
            tracing::debug!(username = %user.username(), ?route, "request authorized");
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            tracing::info!(?route, reason = %err, "request rejected by access gate");
            HttpError::from_error(err).into_response()
        }
    }
}

/// Put a method router behind the gate for `route`.
pub fn guarded<S>(route: Route, handler: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    handler.route_layer(middleware::from_fn(move |req: Request, next: Next| {
        require_route(route, req, next)
    }))
}
