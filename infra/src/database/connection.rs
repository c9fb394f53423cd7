//! MySQL connection pool management

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use signet_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Pool usage snapshot for health endpoints and diagnostics
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    /// Connections currently open
    pub size: u32,
    /// Open connections that are idle
    pub idle: usize,
}

/// Owns the SQLx connection pool for the application lifetime.
///
/// Created once at startup and closed explicitly during shutdown so
/// in-flight queries drain before the process exits.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect and build the pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await?;

        info!(url = %config.masked_url(), max_connections = config.max_connections, "database pool ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool, for tests
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Clone of the underlying pool for repository construction
    pub fn pool(&self) -> MySqlPool {
        self.pool.clone()
    }

    /// Round-trip a trivial query to confirm the database is reachable
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        }
    }

    /// Drain and close every connection. Part of orderly shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
