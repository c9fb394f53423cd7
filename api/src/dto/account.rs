use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signet_core::domain::entities::{Account, AuditLog};
use signet_shared::types::Pagination;

/// Public view of an account. The password hash never leaves the
/// domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDto {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            is_staff: account.is_staff,
            is_locked: account.is_locked,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// One audit trail entry as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub id: Uuid,
    pub event_type: String,
    pub account_id: Option<Uuid>,
    pub email_masked: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: Option<serde_json::Value>,
    pub success: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for EventDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            event_type: log.event_type.as_str().to_string(),
            account_id: log.account_id,
            email_masked: log.email_masked,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            details: log.details,
            success: log.success,
            error_message: log.error_message,
            created_at: log.created_at,
        }
    }
}

/// Query-string pagination parameters for list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), self.per_page.unwrap_or(20))
    }
}
