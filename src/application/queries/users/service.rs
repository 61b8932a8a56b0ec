use std::sync::Arc;

use crate::application::audit::AuditRecorder;
use crate::domain::user::UserRepository;

pub struct UserQueryService {
    pub(super) repo: Arc<dyn UserRepository>,
    pub(super) audit: Arc<AuditRecorder>,
}

impl UserQueryService {
    pub fn new(repo: Arc<dyn UserRepository>, audit: Arc<AuditRecorder>) -> Self {
        Self { repo, audit }
    }
}
