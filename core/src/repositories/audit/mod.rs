//! Audit log repository

#[path = "trait.rs"]
pub mod r#trait;

#[cfg(test)]
pub mod mock;
pub mod noop;

pub use noop::NoOpAuditLogRepository;
pub use r#trait::AuditLogRepository;
