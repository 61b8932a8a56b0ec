//! Create the first administrator account.
//!
//! Reads `ADMIN_USERNAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD` (plus the usual
//! server configuration) and does nothing if that username already exists.
use anyhow::{Context, Result};
use hospital_core::{
    app::build_services,
    application::commands::users::{BootstrapAdminCommand, BootstrapOutcome},
    config::AppConfig,
    infrastructure::database,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let command = BootstrapAdminCommand {
        username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
        email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@hospital.local".to_string()),
        password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
        full_name: env::var("ADMIN_FULL_NAME").ok(),
    };

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let services = build_services(&config, pool)?;

    match services.user_commands.ensure_admin(command).await? {
        BootstrapOutcome::Created(user) => {
            tracing::info!(id = user.id, username = %user.username, "administrator created");
        }
        BootstrapOutcome::AlreadyExists => {
            tracing::info!("administrator already exists, nothing to do");
        }
    }
    Ok(())
}
