pub mod entity;
pub mod repository;

pub use entity::{AuditAction, AuditEntry, AuditStatus, NewAuditEntry};
pub use repository::{AuditLogFilter, AuditLogRepository};
