//! Records security-relevant events to the audit trail.
//!
//! Audit writes are strictly best-effort: a failed write is logged and
//! swallowed so the operation being audited still succeeds. Reads go
//! through [`AuditService::events_for_account`] and
//! [`AuditService::recent_failure_count`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use signet_shared::types::{Page, Pagination};

use crate::domain::entities::account::Account;
use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::value_objects::request_context::RequestContext;
use crate::errors::DomainResult;
use crate::repositories::audit::AuditLogRepository;

#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// When false, every write becomes a no-op
    pub enabled: bool,

    /// Lookback window for failure counting, in minutes
    pub failure_window_minutes: i64,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_window_minutes: 15,
        }
    }
}

pub struct AuditService<R: AuditLogRepository> {
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R: AuditLogRepository> AuditService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_config(repository, AuditServiceConfig::default())
    }

    pub fn with_config(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Write one record, swallowing failures
    pub async fn record(&self, log: AuditLog) {
        if !self.config.enabled {
            return;
        }
        if let Err(e) = self.repository.create(&log).await {
            warn!(error = %e, event = %log.event_type, "audit write failed");
        }
    }

    pub async fn log_login_success(&self, account: &Account, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::LoginSuccess)
            .with_account(account.id)
            .with_email(&account.email);
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_login_failure(&self, email: &str, reason: &str, ctx: &RequestContext) {
        let log = AuditLog::failure(AuditEventType::LoginFailure, reason).with_email(email);
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_account_created(&self, account: &Account, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::AccountCreated)
            .with_account(account.id)
            .with_email(&account.email);
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_token_issued(&self, account_id: Uuid, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::TokenIssued).with_account(account_id);
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_token_refreshed(&self, account_id: Uuid, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::TokenRefreshed).with_account(account_id);
        self.record(with_context(log, ctx)).await;
    }

    /// A refresh was rejected because the token was revoked or replayed
    pub async fn log_refresh_rejected(&self, ctx: &RequestContext) {
        let log = AuditLog::failure(
            AuditEventType::TokenRevoked,
            "refresh token revoked or replayed",
        );
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_logout(&self, account_id: Uuid, jti: &str, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::Logout)
            .with_account(account_id)
            .with_details(serde_json::json!({ "jti": jti }));
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_all_tokens_revoked(
        &self,
        account_id: Uuid,
        generation: i64,
        ctx: &RequestContext,
    ) {
        let log = AuditLog::new(AuditEventType::AllTokensRevoked)
            .with_account(account_id)
            .with_details(serde_json::json!({ "generation": generation }));
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_account_locked(&self, account_id: Uuid, staff_id: Uuid, ctx: &RequestContext) {
        let log = AuditLog::new(AuditEventType::AccountLocked)
            .with_account(account_id)
            .with_details(serde_json::json!({ "locked_by": staff_id.to_string() }));
        self.record(with_context(log, ctx)).await;
    }

    pub async fn log_account_unlocked(
        &self,
        account_id: Uuid,
        staff_id: Uuid,
        ctx: &RequestContext,
    ) {
        let log = AuditLog::new(AuditEventType::AccountUnlocked)
            .with_account(account_id)
            .with_details(serde_json::json!({ "unlocked_by": staff_id.to_string() }));
        self.record(with_context(log, ctx)).await;
    }

    /// Audit records for one account, newest first
    pub async fn events_for_account(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        self.repository.find_by_account(account_id, pagination).await
    }

    /// Failed events for an account within the configured window
    pub async fn recent_failure_count(&self, account_id: Uuid) -> DomainResult<u64> {
        let since = Utc::now() - Duration::minutes(self.config.failure_window_minutes);
        self.repository.count_recent_failures(account_id, since).await
    }
}

fn with_context(mut log: AuditLog, ctx: &RequestContext) -> AuditLog {
    if let Some(ip) = &ctx.ip_address {
        log = log.with_ip(ip.clone());
    }
    if let Some(agent) = &ctx.user_agent {
        log = log.with_user_agent(agent.clone());
    }
    log
}
