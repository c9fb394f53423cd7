//! MySQL repository implementations

pub mod account_repository_impl;
pub mod audit_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use audit_repository_impl::MySqlAuditLogRepository;
