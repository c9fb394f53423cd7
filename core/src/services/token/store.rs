//! Revocation registry contract.
//!
//! The registry holds two kinds of state, both TTL-bound:
//!
//! * per-token revocation entries keyed by `jti`, written when a refresh
//!   token is rotated or a client logs out;
//! * per-account generation counters, bumped to invalidate every token an
//!   account holds at once. An absent counter reads as generation zero.
//!
//! Optionally it also records issued jtis for observability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Whether a revocation entry exists for this jti
    async fn is_revoked(&self, jti: &str) -> DomainResult<bool>;

    /// Write a revocation entry for this jti with the given TTL.
    ///
    /// Returns `true` when this call created the entry and `false` when
    /// the jti was already revoked. The write is atomic: of two
    /// concurrent calls for the same jti exactly one observes `true`.
    async fn revoke(&self, jti: &str, ttl_seconds: i64) -> DomainResult<bool>;

    /// Current generation for an account; accounts never bumped are at
    /// generation zero.
    async fn current_generation(&self, account_id: Uuid) -> DomainResult<i64>;

    /// Atomically increment the account's generation, invalidating every
    /// token minted under earlier generations. Refreshes the counter's
    /// TTL and returns the new generation.
    async fn bump_generation(&self, account_id: Uuid, ttl_seconds: i64) -> DomainResult<i64>;

    /// Record an issued jti for observability. Callers treat failures as
    /// non-fatal.
    async fn record_issued(&self, jti: &str, account_id: Uuid, ttl_seconds: i64)
        -> DomainResult<()>;
}
