// tests/support/helpers.rs
use super::mocks::{
    FailingAuditRepo, FixedClock, InMemoryAuditRepo, InMemoryRecords, InMemoryUserRepo,
    PASSWORD, SIGNING_KEY, StaticReadiness, StrictPasswordHasher, fixed_now,
};
use axum::{
    Router,
    body::{self, Body},
    extract::ConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use hospital_core::{
    application::{
        dto::TokenSubject,
        ports::security::TokenManager,
        services::ApplicationServices,
    },
    domain::{
        audit::AuditLogRepository,
        user::{Email, NewUser, PasswordHash, Role, User, UserRepository, Username},
    },
    infrastructure::security::token::BiscuitTokenManager,
    presentation::http::{routes::build_router, state::HttpState},
};
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use tower::util::ServiceExt as _;

pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub users: Arc<InMemoryUserRepo>,
    pub audit: Arc<InMemoryAuditRepo>,
    pub records: InMemoryRecords,
    tokens: Arc<BiscuitTokenManager>,
}

/// Socket peer attached to every request the harness sends.
pub const PEER_IP: &str = "198.51.100.77";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None, true, false)
    }

    /// Every audit write fails; business operations must not notice.
    pub fn with_failing_audit() -> Self {
        Self::build(Some(Arc::new(FailingAuditRepo)), true, false)
    }

    pub fn with_database_down() -> Self {
        Self::build(None, false, false)
    }

    /// Deployed behind a proxy whose `X-Forwarded-For` is trusted.
    pub fn behind_trusted_proxy() -> Self {
        Self::build(None, true, true)
    }

    fn build(
        audit_override: Option<Arc<dyn AuditLogRepository>>,
        database_up: bool,
        trust_forwarded_for: bool,
    ) -> Self {
        let users = Arc::new(InMemoryUserRepo::default());
        let audit = Arc::new(InMemoryAuditRepo::default());
        let records = InMemoryRecords::default();
        let tokens = Arc::new(
            BiscuitTokenManager::new(
                SIGNING_KEY,
                chrono::Duration::minutes(480),
                Arc::new(FixedClock),
            )
            .expect("test signing key"),
        );

        let audit_port: Arc<dyn AuditLogRepository> = match audit_override {
            Some(repo) => repo,
            None => audit.clone(),
        };

        let services = Arc::new(ApplicationServices::new(
            users.clone(),
            audit_port,
            records.ports(),
            Arc::new(StrictPasswordHasher),
            tokens.clone(),
            Arc::new(FixedClock),
            Arc::new(StaticReadiness { database_up }),
        ));

        let router = build_router(HttpState {
            services: services.clone(),
            allowed_origins: vec!["*".to_string()],
            trust_forwarded_for,
        });

        Self {
            router,
            services,
            users,
            audit,
            records,
            tokens,
        }
    }

    /// Store an account whose password is [`PASSWORD`].
    pub async fn seed_user(&self, username: &str, role: Role) -> User {
        let new_user = NewUser::new(
            Username::new(username).expect("username"),
            Email::new(format!("{username}@hospital.test")).expect("email"),
            PasswordHash::new(StrictPasswordHasher::encode(PASSWORD)).expect("hash"),
            role,
            fixed_now(),
        );
        self.users.insert(new_user).await.expect("seed user")
    }

    /// A valid bearer token for `user`, minted without going through login.
    pub async fn token_for(&self, user: &User) -> String {
        self.tokens
            .issue(TokenSubject::from(user))
            .await
            .expect("issue token")
            .token
    }

    /// Seed an account with `role` and return its token.
    pub async fn login_as(&self, username: &str, role: Role) -> String {
        let user = self.seed_user(username, role).await;
        self.token_for(&user).await
    }

    pub async fn send(&self, mut request: Request<Body>) -> TestResponse {
        if request.extensions().get::<ConnectInfo<SocketAddr>>().is_none() {
            let peer: SocketAddr = format!("{PEER_IP}:5555").parse().expect("peer address");
            request.extensions_mut().insert(ConnectInfo(peer));
        }
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let (parts, body_stream) = response.into_parts();
        let bytes = body::to_bytes(body_stream, 1024 * 1024)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::PUT, uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, token, None)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(login_request(username, password)).await
    }
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    let form = format!("username={username}&password={password}");
    Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .expect("request")
}

pub fn request(method: Method, uri: &str, token: Option<&str>, json: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match json {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

/// Assert the `{error, message}` error body and its status.
pub fn assert_error(response: &TestResponse, status: StatusCode, error: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["error"], error, "body: {}", response.body);
    assert!(
        response.body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a message in {}",
        response.body
    );
}
