//! Audit repository that drops every record.
//!
//! Used where auditing is switched off, and as the default audit type
//! parameter for services that make auditing optional.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use signet_shared::types::{Page, Pagination};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainResult;

use super::r#trait::AuditLogRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn create(&self, _log: &AuditLog) -> DomainResult<()> {
        Ok(())
    }

    async fn find_by_account(
        &self,
        _account_id: Uuid,
        _pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        Ok(Page::empty())
    }

    async fn find_by_event_type(
        &self,
        _event_type: AuditEventType,
        _limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        Ok(Vec::new())
    }

    async fn count_recent_failures(
        &self,
        _account_id: Uuid,
        _since: DateTime<Utc>,
    ) -> DomainResult<u64> {
        Ok(0)
    }
}
