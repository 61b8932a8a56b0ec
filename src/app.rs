// src/app.rs
//! Wires the Postgres adapters into the application services.
use crate::application::{
    ports::{
        health::ReadinessCheck,
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::ApplicationServices,
};
use crate::config::AppConfig;
use crate::domain::{audit::AuditLogRepository, user::UserRepository};
use crate::infrastructure::{
    database::PostgresReadinessCheck,
    repositories::{
        PostgresAuditLogRepository, PostgresUserRepository, postgres_record_repositories,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
};
use sqlx::PgPool;
use std::sync::Arc;

pub fn build_services(config: &AppConfig, pool: PgPool) -> anyhow::Result<ApplicationServices> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let audit_repo: Arc<dyn AuditLogRepository> =
        Arc::new(PostgresAuditLogRepository::new(pool.clone()));
    let records = postgres_record_repositories(&pool);

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.token_signing_key(),
        config.token_ttl(),
        Arc::clone(&clock),
    )?);
    let readiness: Arc<dyn ReadinessCheck> = Arc::new(PostgresReadinessCheck::new(pool));

    Ok(ApplicationServices::new(
        user_repo,
        audit_repo,
        records,
        password_hasher,
        token_manager,
        clock,
        readiness,
    ))
}
