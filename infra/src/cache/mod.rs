//! Redis-backed cache layer.
//!
//! The token revocation registry, the per-account generation counters and
//! the background job queue all run through the shared [`RedisClient`].

pub mod redis_client;
pub mod revocation_store;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use signet_shared::config::CacheConfig;
