//! Audit log repository contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use signet_shared::types::{Page, Pagination};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainResult;

/// Persistence for the audit trail.
///
/// Audit writes are append-only; records are never updated or deleted
/// through this trait.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one record to the trail
    async fn create(&self, log: &AuditLog) -> DomainResult<()>;

    /// Records for one account, newest first
    async fn find_by_account(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>>;

    /// Most recent records of one event type, newest first
    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>>;

    /// Number of failed events recorded for an account since a point in
    /// time
    async fn count_recent_failures(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> DomainResult<u64>;
}
