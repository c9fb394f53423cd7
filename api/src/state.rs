//! Shared application state injected into handlers.

use std::sync::Arc;

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::{AuthService, RevocationStore};
use signet_infra::cache::RedisClient;
use signet_infra::database::connection::DatabasePool;

/// Service container handed to every request handler.
pub struct AppState<U, S, A>
where
    U: AccountRepository,
    S: RevocationStore,
    A: AuditLogRepository,
{
    pub auth_service: Arc<AuthService<U, S, A>>,
}

impl<U, S, A> AppState<U, S, A>
where
    U: AccountRepository,
    S: RevocationStore,
    A: AuditLogRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, S, A>>) -> Self {
        Self { auth_service }
    }
}

/// Backing-store handles for the health endpoint.
///
/// Kept separate from [`AppState`] so tests can run the full app without
/// a database or Redis behind it.
#[derive(Clone, Default)]
pub struct HealthState {
    pub database: Option<DatabasePool>,
    pub cache: Option<RedisClient>,
}

impl HealthState {
    pub fn new(database: DatabasePool, cache: RedisClient) -> Self {
        Self {
            database: Some(database),
            cache: Some(cache),
        }
    }

    /// State with no backing stores; checks report them as skipped
    pub fn disconnected() -> Self {
        Self::default()
    }
}
