//! Cache (Redis) configuration module

use serde::{Deserialize, Serialize};

/// Redis connection configuration
///
/// The cache backs the token revocation registry and the job queue, so the
/// connection settings live in shared config rather than the infra crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL (redis://[:password@]host:port[/db])
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Default TTL for cache entries in seconds
    pub default_ttl: u64,

    /// Prefix applied to every key written through this connection
    pub key_prefix: String,

    /// Redis logical database index
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 2,
            default_ttl: 3600,
            key_prefix: String::from("signet"),
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url);
        let connection_timeout = std::env::var("REDIS_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.connection_timeout);
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix);
        let database = std::env::var("REDIS_DATABASE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.database);

        Self {
            url,
            connection_timeout,
            key_prefix,
            database,
            ..defaults
        }
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Build a namespaced key with the configured prefix
    pub fn make_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}
