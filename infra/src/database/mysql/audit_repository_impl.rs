//! MySQL implementation of the audit log repository.
//!
//! Records land in the append-only `audit_log` table. The `details`
//! payload is stored as serialized JSON text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use signet_core::domain::entities::audit::{AuditEventType, AuditLog};
use signet_core::errors::{DomainError, DomainResult};
use signet_core::repositories::AuditLogRepository;
use signet_shared::types::{Page, Pagination};

use super::super::classify_sqlx_error;

const COLUMNS: &str = "id, event_type, account_id, email_masked, ip_address, user_agent, \
                       details, success, error_message, created_at";

pub struct MySqlAuditLogRepository {
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_log(row: &sqlx::mysql::MySqlRow) -> DomainResult<AuditLog> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let event_type_str: String = row
            .try_get("event_type")
            .map_err(|e| column_error("event_type", e))?;
        let event_type = AuditEventType::from_str(&event_type_str).ok_or_else(|| {
            DomainError::internal(format!("unknown audit event type: {event_type_str}"))
        })?;

        let account_id: Option<String> = row
            .try_get("account_id")
            .map_err(|e| column_error("account_id", e))?;
        let account_id = account_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| DomainError::internal(format!("invalid account UUID: {e}")))?;

        let details: Option<String> = row
            .try_get("details")
            .map_err(|e| column_error("details", e))?;
        let details = details
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|e| DomainError::internal(format!("invalid details payload: {e}")))?;

        Ok(AuditLog {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid audit UUID: {e}")))?,
            event_type,
            account_id,
            email_masked: row
                .try_get("email_masked")
                .map_err(|e| column_error("email_masked", e))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| column_error("ip_address", e))?,
            user_agent: row
                .try_get("user_agent")
                .map_err(|e| column_error("user_agent", e))?,
            details,
            success: row
                .try_get("success")
                .map_err(|e| column_error("success", e))?,
            error_message: row
                .try_get("error_message")
                .map_err(|e| column_error("error_message", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn create(&self, log: &AuditLog) -> DomainResult<()> {
        let details = log
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DomainError::internal(format!("failed to serialize details: {e}")))?;

        let query =
            format!("INSERT INTO audit_log ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)");
        sqlx::query(&query)
            .bind(log.id.to_string())
            .bind(log.event_type.as_str())
            .bind(log.account_id.map(|id| id.to_string()))
            .bind(&log.email_masked)
            .bind(&log.ip_address)
            .bind(&log.user_agent)
            .bind(details)
            .bind(log.success)
            .bind(&log.error_message)
            .bind(log.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "audit log"))?;

        Ok(())
    }

    async fn find_by_account(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        let count_row = sqlx::query("SELECT COUNT(*) AS count FROM audit_log WHERE account_id = ?")
            .bind(account_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "audit log"))?;
        let total: i64 = count_row
            .try_get("count")
            .map_err(|e| column_error("count", e))?;

        let query = format!(
            "SELECT {COLUMNS} FROM audit_log WHERE account_id = ? \
             ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&query)
            .bind(account_id.to_string())
            .bind(pagination.limit() as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "audit log"))?;

        let items = rows
            .iter()
            .map(Self::row_to_log)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(items, total as u64))
    }

    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_log WHERE event_type = ? \
             ORDER BY created_at DESC LIMIT ?"
        );
        let rows = sqlx::query(&query)
            .bind(event_type.as_str())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "audit log"))?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn count_recent_failures(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM audit_log \
             WHERE account_id = ? AND success = FALSE AND created_at >= ?",
        )
        .bind(account_id.to_string())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "audit log"))?;

        let count: i64 = row.try_get("count").map_err(|e| column_error("count", e))?;
        Ok(count as u64)
    }
}

fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::internal(format!("failed to read {column}: {err}"))
}
