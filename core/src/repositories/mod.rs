//! Repository traits abstracting persistence.
//!
//! Concrete implementations live in the infrastructure crate; everything
//! here is storage-agnostic. [`base::Repository`] covers the operations
//! every entity store supports, and per-entity traits extend it with
//! entity-specific queries.

pub mod account;
pub mod audit;
pub mod base;

pub use account::AccountRepository;
pub use audit::AuditLogRepository;
pub use base::{Entity, Repository};
