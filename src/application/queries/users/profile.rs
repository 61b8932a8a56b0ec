use super::UserQueryService;
use crate::application::{
    audit::{AuditRecord, RequestActor},
    commands::users::USERS_RESOURCE,
    dto::{AuthenticatedUser, UserDto},
    error::ApplicationResult,
};
use crate::domain::audit::AuditAction;

impl UserQueryService {
    /// The caller's own account, as loaded by the gate for this request.
    pub async fn current_user(
        &self,
        actor: &RequestActor,
        user: &AuthenticatedUser,
    ) -> ApplicationResult<UserDto> {
        self.audit
            .record(
                AuditRecord::new(actor.clone(), AuditAction::Read, USERS_RESOURCE)
                    .with_resource_id(user.id())
                    .with_details("read own profile"),
            )
            .await;
        Ok(user.user.clone().into())
    }
}
