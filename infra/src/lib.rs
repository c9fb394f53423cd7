//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and store traits defined
//! in `signet_core`:
//!
//! - **Database**: MySQL repositories for accounts and the audit trail,
//!   via SQLx
//! - **Cache**: Redis client, plus the Redis-backed token revocation
//!   registry
//! - **Jobs**: Redis-backed background job queue
//!
//! ## Features
//!
//! - `mysql`: MySQL database support (default)
//! - `redis-cache`: Redis cache, revocation registry, and job queue
//!   (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and the revocation registry
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Jobs module - Redis-backed job queue
#[cfg(feature = "redis-cache")]
pub mod jobs;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
