//! Redis list-backed job queue.
//!
//! Jobs are serialized to JSON and pushed onto a single pending list;
//! workers drain it with `BRPOP` from the other end.

use async_trait::async_trait;
use tracing::debug;

use signet_core::errors::{DomainError, DomainResult};
use signet_core::services::{JobQueue, JobRequest};

use crate::cache::redis_client::{is_retriable_error, RedisClient};
use crate::InfrastructureError;

const PENDING_LIST_KEY: &str = "jobs:pending";

pub struct RedisJobQueue {
    client: RedisClient,
}

impl RedisJobQueue {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn enqueue(&self, job: &JobRequest) -> DomainResult<()> {
        let payload = serde_json::to_string(job)
            .map_err(|e| DomainError::internal(format!("failed to serialize job: {e}")))?;

        let depth = self
            .client
            .lpush(PENDING_LIST_KEY, &payload)
            .await
            .map_err(|e| match &e {
                InfrastructureError::Cache(cache_err) if is_retriable_error(cache_err) => {
                    DomainError::unavailable(format!("job queue unreachable: {e}"))
                }
                _ => DomainError::internal(format!("job queue error: {e}")),
            })?;

        debug!(job_id = %job.id, kind = job.kind.as_str(), depth, "job enqueued");
        Ok(())
    }
}
