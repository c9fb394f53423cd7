//! Redis-backed token revocation registry.
//!
//! Three key families, all namespaced by the client's configured prefix:
//!
//! * `jwt:revoked:{jti}` - per-token revocation entries, written with
//!   `SET NX EX` so concurrent revocations of the same jti race cleanly;
//! * `jwt:gen:{account_id}` - per-account generation counters, bumped with
//!   `INCR`. An absent counter reads as generation zero.
//! * `jwt:issued:{jti}` - optional issuance records for observability.
//!
//! All entries are TTL-bound to the lifetime of the tokens they govern, so
//! the registry cleans itself up without a sweeper.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use signet_core::errors::{DomainError, DomainResult};
use signet_core::services::RevocationStore;

use super::redis_client::{is_retriable_error, RedisClient};
use crate::InfrastructureError;

const REVOKED_KEY_PREFIX: &str = "jwt:revoked";
const GENERATION_KEY_PREFIX: &str = "jwt:gen";
const ISSUED_KEY_PREFIX: &str = "jwt:issued";

pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn revoked_key(jti: &str) -> String {
        format!("{REVOKED_KEY_PREFIX}:{jti}")
    }

    fn generation_key(account_id: Uuid) -> String {
        format!("{GENERATION_KEY_PREFIX}:{account_id}")
    }

    fn issued_key(jti: &str) -> String {
        format!("{ISSUED_KEY_PREFIX}:{jti}")
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        self.client
            .exists(&Self::revoked_key(jti))
            .await
            .map_err(into_domain)
    }

    async fn revoke(&self, jti: &str, ttl_seconds: i64) -> DomainResult<bool> {
        let revoked_at = Utc::now().timestamp().to_string();
        self.client
            .set_nx_with_expiry(
                &Self::revoked_key(jti),
                &revoked_at,
                ttl_seconds.max(1) as u64,
            )
            .await
            .map_err(into_domain)
    }

    async fn current_generation(&self, account_id: Uuid) -> DomainResult<i64> {
        let raw = self
            .client
            .get(&Self::generation_key(account_id))
            .await
            .map_err(into_domain)?;

        match raw {
            None => Ok(0),
            Some(value) => value.parse().map_err(|_| {
                DomainError::internal(format!(
                    "generation counter for {account_id} holds non-numeric value"
                ))
            }),
        }
    }

    async fn bump_generation(&self, account_id: Uuid, ttl_seconds: i64) -> DomainResult<i64> {
        self.client
            .increment(
                &Self::generation_key(account_id),
                Some(ttl_seconds.max(1) as u64),
            )
            .await
            .map_err(into_domain)
    }

    async fn record_issued(
        &self,
        jti: &str,
        account_id: Uuid,
        ttl_seconds: i64,
    ) -> DomainResult<()> {
        self.client
            .set_with_expiry(
                &Self::issued_key(jti),
                &account_id.to_string(),
                ttl_seconds.max(1) as u64,
            )
            .await
            .map_err(into_domain)
    }
}

/// Connection-level failures surface as retriable `Unavailable`, anything
/// else as `Internal`.
fn into_domain(err: InfrastructureError) -> DomainError {
    match &err {
        InfrastructureError::Cache(e) if is_retriable_error(e) => {
            DomainError::unavailable(format!("revocation store unreachable: {err}"))
        }
        _ => DomainError::internal(format!("revocation store error: {err}")),
    }
}
