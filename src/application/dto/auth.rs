use crate::domain::user::{Role, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// OAuth2-style body returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthTokenDto> for TokenResponse {
    fn from(token: AuthTokenDto) -> Self {
        Self {
            access_token: token.token,
            token_type: "bearer".to_string(),
            expires_in: token.expires_in,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub username: String,
    pub role: Role,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            role: user.role,
        }
    }
}

/// Facts carried by a verified token. The role here is what was true at
/// issuance; authorization uses the stored account instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// An active account that passed token verification on this request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn username(&self) -> &str {
        self.user.username.as_str()
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}
