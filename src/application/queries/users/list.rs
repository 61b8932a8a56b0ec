use super::UserQueryService;
use crate::{
    application::{
        audit::{AuditRecord, RequestActor},
        commands::users::USERS_RESOURCE,
        dto::UserDto,
        error::ApplicationResult,
        queries::normalize_limit,
    },
    domain::audit::AuditAction,
};

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default)]
pub struct ListUsersQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl UserQueryService {
    pub async fn list_users(
        &self,
        actor: &RequestActor,
        query: ListUsersQuery,
    ) -> ApplicationResult<Vec<UserDto>> {
        let skip = query.skip.unwrap_or(0);
        let limit = normalize_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);

        let outcome = self
            .repo
            .list(skip, limit)
            .await
            .map(|users| users.into_iter().map(UserDto::from).collect::<Vec<_>>())
            .map_err(Into::into);

        self.audit
            .record_outcome(
                AuditRecord::new(actor.clone(), AuditAction::Read, USERS_RESOURCE)
                    .with_details(format!("list users skip={skip} limit={limit}")),
                &outcome,
                |_| None,
            )
            .await;
        outcome
    }
}
