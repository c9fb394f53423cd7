//! Audit trail entities.
//!
//! Every security-relevant action produces an [`AuditLog`] record. Emails
//! are masked before they are stored so the trail never holds a full
//! address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of auditable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// Successful login with valid credentials
    LoginSuccess,
    /// Failed login attempt
    LoginFailure,
    /// New account registered
    AccountCreated,
    /// Account locked by staff
    AccountLocked,
    /// Account unlocked by staff
    AccountUnlocked,
    /// Token pair issued
    TokenIssued,
    /// Token pair rotated on refresh
    TokenRefreshed,
    /// Single refresh token revoked
    TokenRevoked,
    /// All tokens for an account revoked
    AllTokensRevoked,
    /// Explicit logout
    Logout,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::LoginSuccess => "login_success",
            AuditEventType::LoginFailure => "login_failure",
            AuditEventType::AccountCreated => "account_created",
            AuditEventType::AccountLocked => "account_locked",
            AuditEventType::AccountUnlocked => "account_unlocked",
            AuditEventType::TokenIssued => "token_issued",
            AuditEventType::TokenRefreshed => "token_refreshed",
            AuditEventType::TokenRevoked => "token_revoked",
            AuditEventType::AllTokensRevoked => "all_tokens_revoked",
            AuditEventType::Logout => "logout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login_success" => Some(AuditEventType::LoginSuccess),
            "login_failure" => Some(AuditEventType::LoginFailure),
            "account_created" => Some(AuditEventType::AccountCreated),
            "account_locked" => Some(AuditEventType::AccountLocked),
            "account_unlocked" => Some(AuditEventType::AccountUnlocked),
            "token_issued" => Some(AuditEventType::TokenIssued),
            "token_refreshed" => Some(AuditEventType::TokenRefreshed),
            "token_revoked" => Some(AuditEventType::TokenRevoked),
            "all_tokens_revoked" => Some(AuditEventType::AllTokensRevoked),
            "logout" => Some(AuditEventType::Logout),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single audit trail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub event_type: AuditEventType,
    /// Account the event concerns, if known
    pub account_id: Option<Uuid>,
    /// Masked email involved in the event
    pub email_masked: Option<String>,
    /// Client IP the request came from
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
    /// Event-specific detail payload
    pub details: Option<serde_json::Value>,
    /// Whether the action succeeded
    pub success: bool,
    /// Failure description when success is false
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// New successful event of the given type
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            account_id: None,
            email_masked: None,
            ip_address: None,
            user_agent: None,
            details: None,
            success: true,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    /// New failed event carrying an error description
    pub fn failure(event_type: AuditEventType, error_message: impl Into<String>) -> Self {
        let mut log = Self::new(event_type);
        log.success = false;
        log.error_message = Some(error_message.into());
        log
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Attach an email, masking it first
    pub fn with_email(mut self, email: &str) -> Self {
        self.email_masked = Some(mask_email(email));
        self
    }

    pub fn with_ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Mask an email for storage, keeping the first character of the local
/// part and the full domain: `alice@example.com` -> `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
