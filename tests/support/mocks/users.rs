// tests/support/mocks/users.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hospital_core::domain::{
    errors::{DomainError, DomainResult},
    user::{Email, NewUser, Role, User, UserId, UserRepository, UserUpdate, Username},
};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryUserRepo {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn get(&self, username: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username.as_str() == username)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count_by_role(&self, role: Role) -> DomainResult<u64> {
        Ok(self.rows.lock().unwrap().iter().filter(|u| u.role == role).count() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already registered".into()));
        }
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let user = User {
            id: UserId::new(rows.len() as i64 + 1)?,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            full_name: new_user.full_name,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
            last_login: None,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> DomainResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::not_found("user not found"))?;
        user.apply(&update);
        Ok(user.clone())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(user) = self.rows.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}
