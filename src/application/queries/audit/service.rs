use std::sync::Arc;

use crate::application::audit::AuditRecorder;

pub struct AuditQueryService {
    pub(super) recorder: Arc<AuditRecorder>,
}

impl AuditQueryService {
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }
}
