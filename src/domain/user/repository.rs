use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{Email, Role, UserId, Username},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Credential store. Users are never hard-deleted, so there is no delete.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count_by_role(&self, role: Role) -> DomainResult<u64>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<User>>;

    /// Returns `NotFound` when the id does not exist.
    async fn update(&self, update: UserUpdate) -> DomainResult<User>;

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> DomainResult<()>;
}
