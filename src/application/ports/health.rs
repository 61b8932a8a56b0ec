use crate::application::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn ping(&self) -> ApplicationResult<()>;
}
