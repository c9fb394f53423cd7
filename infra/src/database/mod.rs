//! Database module - MySQL implementations using SQLx
//!
//! Provides connection pool management and the MySQL repository
//! implementations for accounts and the audit trail.

pub mod connection;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlAuditLogRepository};

use signet_core::errors::DomainError;

/// Translate a SQLx error into the domain taxonomy.
///
/// Connectivity problems become retriable `Unavailable` errors, unique
/// key violations become `Conflict` on the given resource, and anything
/// else is an internal error.
pub(crate) fn classify_sqlx_error(err: sqlx::Error, resource: &str) -> DomainError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DomainError::unavailable(format!("database unavailable: {err}")),
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::conflict(resource),
        sqlx::Error::RowNotFound => DomainError::not_found(resource),
        _ => DomainError::internal(format!("database error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_retriable() {
        let err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert!(classify_sqlx_error(err, "account").is_retriable());
    }

    #[test]
    fn test_pool_timeout_is_retriable() {
        assert!(classify_sqlx_error(sqlx::Error::PoolTimedOut, "account").is_retriable());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = classify_sqlx_error(sqlx::Error::RowNotFound, "account");
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = classify_sqlx_error(sqlx::Error::WorkerCrashed, "account");
        assert!(matches!(err, DomainError::Internal { .. }));
        assert!(!err.is_retriable());
    }
}
