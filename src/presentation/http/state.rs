// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// CORS origins; a single `*` allows any origin.
    pub allowed_origins: Vec<String>,
    /// Take the caller address from `X-Forwarded-For` instead of the socket.
    pub trust_forwarded_for: bool,
}
