use super::UserCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        dto::{AuthTokenDto, TokenSubject},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::AuditAction,
        errors::DomainError,
        user::{User, Username},
    },
};

const AUTH_RESOURCE: &str = "auth";
const LOGIN_FAILED: &str = "incorrect username or password";

pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

impl UserCommandService {
    /// Exchange credentials for a bearer token. Every attempt is audited:
    /// success against the account, failure with no actor and the attempted
    /// username. Unknown user, wrong password and inactive account all look
    /// the same to the caller.
    pub async fn login(
        &self,
        command: LoginUserCommand,
        ip_address: Option<String>,
    ) -> ApplicationResult<AuthTokenDto> {
        match self.attempt_login(&command).await {
            Ok((user, token)) => {
                let actor = RequestActor {
                    user_id: Some(user.id),
                    username: Some(user.username.to_string()),
                    ip_address,
                };
                self.audit
                    .record(
                        AuditRecord::new(actor, AuditAction::Login, AUTH_RESOURCE)
                            .with_resource_id(user.id)
                            .with_details("login succeeded"),
                    )
                    .await;
                Ok(token)
            }
            Err(err) => {
                tracing::info!(username = %command.username, reason = %err, "login rejected");
                let actor = RequestActor::anonymous(Some(command.username.clone()), ip_address);
                self.audit
                    .record(
                        AuditRecord::new(actor, AuditAction::Login, AUTH_RESOURCE)
                            .with_details(format!("login failed: {err}"))
                            .failed(),
                    )
                    .await;
                if is_infrastructure(&err) {
                    Err(err)
                } else {
                    Err(ApplicationError::unauthorized(LOGIN_FAILED))
                }
            }
        }
    }

    async fn attempt_login(
        &self,
        command: &LoginUserCommand,
    ) -> ApplicationResult<(User, AuthTokenDto)> {
        let username = Username::new(command.username.clone())
            .map_err(|_| ApplicationError::unauthorized("malformed username"))?;
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown user"))?;

        self.password_hasher
            .verify(&command.password, user.password_hash.as_str())
            .await?;

        if !user.is_active {
            return Err(ApplicationError::unauthorized("account is inactive"));
        }

        let token = self.token_manager.issue(TokenSubject::from(&user)).await?;
        self.user_repo.record_login(user.id, self.clock.now()).await?;

        Ok((user, token))
    }
}

fn is_infrastructure(err: &ApplicationError) -> bool {
    matches!(
        err,
        ApplicationError::Infrastructure(_) | ApplicationError::Domain(DomainError::Persistence(_))
    )
}
