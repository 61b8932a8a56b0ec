use super::{USERS_RESOURCE, UserCommandService, password::validate_password};
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::AuditAction,
        records::optional_text,
        user::{Email, NewUser, PasswordHash, Role, User, Username},
    },
};

const FULL_NAME_MAX: usize = 150;

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
}

impl UserCommandService {
    pub async fn register(
        &self,
        actor: &RequestActor,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let details = format!(
            "register user '{}' with role {}",
            command.username, command.role
        );
        let outcome = self.create_user(command).await;
        self.audit
            .record_outcome(
                AuditRecord::new(actor.clone(), AuditAction::Create, USERS_RESOURCE)
                    .with_details(details),
                &outcome,
                |user| Some(user.id.into()),
            )
            .await;
        outcome.map(Into::into)
    }

    pub(super) async fn create_user(&self, command: RegisterUserCommand) -> ApplicationResult<User> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        let full_name = optional_text("full_name", command.full_name, FULL_NAME_MAX)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already registered"));
        }
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(username, email, password_hash, command.role, self.clock.now())
            .with_full_name(full_name);
        Ok(self.user_repo.insert(new_user).await?)
    }
}
