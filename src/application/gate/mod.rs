// src/application/gate/mod.rs
//! Authentication and role checks shared by every guarded route.
use std::sync::Arc;

use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::domain::access::{AccessPolicy, Route, RoleSet};
use crate::domain::user::{UserRepository, Username};

pub struct AccessGate {
    user_repo: Arc<dyn UserRepository>,
    token_manager: Arc<dyn TokenManager>,
}

impl AccessGate {
    pub fn new(user_repo: Arc<dyn UserRepository>, token_manager: Arc<dyn TokenManager>) -> Self {
        Self {
            user_repo,
            token_manager,
        }
    }

    /// Verify the token and resolve it to a stored, active account. Never
    /// writes anything.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let claims = self.token_manager.authenticate(token).await?;

        let username = Username::new(claims.username)
            .map_err(|_| ApplicationError::unauthorized("invalid token subject"))?;
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("user not found"))?;

        if !user.is_active {
            return Err(ApplicationError::unauthorized("account is inactive"));
        }

        Ok(AuthenticatedUser { user })
    }

    /// Authenticate, then check the stored role against the route's policy.
    pub async fn authorize_request(
        &self,
        token: Option<&str>,
        route: Route,
    ) -> ApplicationResult<AuthenticatedUser> {
        let token = token.ok_or_else(|| ApplicationError::unauthorized("not authenticated"))?;
        let user = self.authenticate(token).await?;
        check_policy(&user, route.policy())?;
        Ok(user)
    }
}

/// Pure membership test. No role is implicitly above another.
pub fn authorize(user: &AuthenticatedUser, allowed: RoleSet) -> ApplicationResult<()> {
    check_policy(user, AccessPolicy::Roles(allowed))
}

fn check_policy(user: &AuthenticatedUser, policy: AccessPolicy) -> ApplicationResult<()> {
    if policy.permits(user.role()) {
        return Ok(());
    }
    let required = match policy {
        AccessPolicy::Roles(allowed) => allowed.to_string(),
        AccessPolicy::AnyAuthenticated => "an authenticated account".to_string(),
    };
    Err(ApplicationError::forbidden(format!(
        "role '{}' is not permitted here; requires one of {required}",
        user.role()
    )))
}
