//! Background job submission.
//!
//! Services hand work that must not block a request (emails, alerts) to
//! a [`JobQueue`]; a worker elsewhere drains it. Enqueueing is
//! best-effort from the caller's point of view: auth flows log and
//! continue when the queue is down.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainResult;

/// Job categories understood by workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Send a welcome email to a new account
    WelcomeEmail,
    /// Notify an account of a security-relevant event
    SecurityAlert,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::WelcomeEmail => "welcome_email",
            JobKind::SecurityAlert => "security_alert",
        }
    }
}

/// A unit of background work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: Uuid,
    pub kind: JobKind,
    /// Job-specific payload for the worker
    pub payload: serde_json::Value,
    pub enqueued_at: DateTime<Utc>,
}

impl JobRequest {
    pub fn new(kind: JobKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            payload,
            enqueued_at: Utc::now(),
        }
    }

    /// Welcome email for a freshly registered account
    pub fn welcome_email(account_id: Uuid, email: &str) -> Self {
        Self::new(
            JobKind::WelcomeEmail,
            serde_json::json!({
                "account_id": account_id.to_string(),
                "email": email,
            }),
        )
    }

    /// Security notification, e.g. after all sessions were revoked
    pub fn security_alert(account_id: Uuid, message: &str) -> Self {
        Self::new(
            JobKind::SecurityAlert,
            serde_json::json!({
                "account_id": account_id.to_string(),
                "message": message,
            }),
        )
    }
}

/// Submission side of the job queue
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &JobRequest) -> DomainResult<()>;
}

/// Queue that discards every job, for deployments without workers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpJobQueue;

impl NoOpJobQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobQueue for NoOpJobQueue {
    async fn enqueue(&self, _job: &JobRequest) -> DomainResult<()> {
        Ok(())
    }
}
