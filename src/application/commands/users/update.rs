use super::{USERS_RESOURCE, UserCommandService};
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::AuditAction,
        records::optional_text,
        user::{Email, Role, User, UserId, UserUpdate},
    },
};

pub struct UpdateUserCommand {
    pub user_id: i64,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &RequestActor,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        let mut fields = Vec::new();
        if command.email.is_some() {
            fields.push("email");
        }
        if command.full_name.is_some() {
            fields.push("full_name");
        }
        if command.role.is_some() {
            fields.push("role");
        }
        if command.is_active.is_some() {
            fields.push("is_active");
        }
        let mut record = AuditRecord::new(actor.clone(), AuditAction::Update, USERS_RESOURCE)
            .with_details(format!("updated fields: {}", fields.join(", ")));
        if command.user_id > 0 {
            record = record.with_resource_id(command.user_id);
        }

        let outcome = self.apply_user_update(command).await;
        self.audit.record_outcome(record, &outcome, |_| None).await;
        outcome.map(Into::into)
    }

    async fn apply_user_update(&self, command: UpdateUserCommand) -> ApplicationResult<User> {
        let user_id = UserId::new(command.user_id)?;
        let mut update = UserUpdate::new(user_id);

        if let Some(email) = command.email {
            let email = Email::new(email)?;
            if let Some(owner) = self.user_repo.find_by_email(&email).await? {
                if owner.id != user_id {
                    return Err(ApplicationError::conflict("email already registered"));
                }
            }
            update = update.with_email(email);
        }
        if let Some(full_name) = optional_text("full_name", command.full_name, 150)? {
            update = update.with_full_name(full_name);
        }
        if let Some(role) = command.role {
            update = update.with_role(role);
        }
        if let Some(is_active) = command.is_active {
            update = update.with_is_active(is_active);
        }

        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        Ok(self.user_repo.update(update).await?)
    }
}
