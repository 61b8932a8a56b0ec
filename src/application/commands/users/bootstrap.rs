use super::{RegisterUserCommand, USERS_RESOURCE, UserCommandService};
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        dto::UserDto,
        error::ApplicationResult,
    },
    domain::{
        audit::AuditAction,
        user::Role,
    },
};

pub struct BootstrapAdminCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug)]
pub enum BootstrapOutcome {
    Created(UserDto),
    AlreadyExists,
}

impl UserCommandService {
    /// Create the first administrator. Once any admin account exists this
    /// is a no-op, whatever username is asked for.
    pub async fn ensure_admin(
        &self,
        command: BootstrapAdminCommand,
    ) -> ApplicationResult<BootstrapOutcome> {
        if self.user_repo.count_by_role(Role::Admin).await? > 0 {
            return Ok(BootstrapOutcome::AlreadyExists);
        }

        let user = self
            .create_user(RegisterUserCommand {
                username: command.username,
                email: command.email,
                password: command.password,
                role: Role::Admin,
                full_name: command.full_name,
            })
            .await?;

        let actor = RequestActor::anonymous(Some("system".to_string()), None);
        self.audit
            .record(
                AuditRecord::new(actor, AuditAction::Create, USERS_RESOURCE)
                    .with_resource_id(user.id)
                    .with_details("bootstrap administrator created"),
            )
            .await;

        Ok(BootstrapOutcome::Created(user.into()))
    }
}
