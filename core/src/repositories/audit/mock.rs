//! In-memory audit repository for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use signet_shared::types::{Page, Pagination};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::{DomainError, DomainResult};

use super::r#trait::AuditLogRepository;

#[derive(Clone, Default)]
pub struct MockAuditLogRepository {
    logs: Arc<Mutex<Vec<AuditLog>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// Everything recorded so far, in insertion order
    pub fn logs(&self) -> Vec<AuditLog> {
        self.logs.lock().unwrap().clone()
    }

    /// Recorded events of one type, in insertion order
    pub fn logs_of_type(&self, event_type: AuditEventType) -> Vec<AuditLog> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.event_type == event_type)
            .cloned()
            .collect()
    }

    fn check_available(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            Err(DomainError::unavailable("database unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, log: &AuditLog) -> DomainResult<()> {
        self.check_available()?;
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn find_by_account(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        self.check_available()?;
        let logs = self.logs.lock().unwrap();
        let mut matching: Vec<AuditLog> = logs
            .iter()
            .filter(|l| l.account_id == Some(account_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(Page::new(items, total))
    }

    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        self.check_available()?;
        let logs = self.logs.lock().unwrap();
        let mut matching: Vec<AuditLog> = logs
            .iter()
            .filter(|l| l.event_type == event_type)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn count_recent_failures(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> DomainResult<u64> {
        self.check_available()?;
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .iter()
            .filter(|l| l.account_id == Some(account_id) && !l.success && l.created_at >= since)
            .count() as u64)
    }
}
