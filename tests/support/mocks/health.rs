// tests/support/mocks/health.rs
use async_trait::async_trait;
use hospital_core::application::{
    ApplicationResult, error::ApplicationError, ports::health::ReadinessCheck,
};

#[derive(Debug, Clone, Copy)]
pub struct StaticReadiness {
    pub database_up: bool,
}

#[async_trait]
impl ReadinessCheck for StaticReadiness {
    async fn ping(&self) -> ApplicationResult<()> {
        if self.database_up {
            Ok(())
        } else {
            Err(ApplicationError::infrastructure("connection refused"))
        }
    }
}
