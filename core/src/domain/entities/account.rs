//! Account entity representing an authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account in the credential store.
///
/// Accounts are provisioned explicitly, mutated by lock/unlock and profile
/// updates, and never hard-deleted. The password is stored only as a
/// bcrypt hash; the plaintext never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: Uuid,

    /// Email address (unique, stored normalized to lowercase)
    pub email: String,

    /// bcrypt hash of the account password
    pub password_hash: String,

    /// Whether this account may use the staff surfaces
    pub is_staff: bool,

    /// Whether this account is locked out of authentication
    pub is_locked: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,

    /// When the account last logged in successfully
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new account with a fresh id and timestamps
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_staff: false,
            is_locked: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Create a staff account
    pub fn new_staff(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let mut account = Self::new(email, password_hash);
        account.is_staff = true;
        account
    }

    /// Whether the account may authenticate
    pub fn is_active(&self) -> bool {
        !self.is_locked
    }

    /// Lock the account, failing all subsequent verifications
    pub fn lock(&mut self) {
        self.is_locked = true;
        self.updated_at = Utc::now();
    }

    /// Unlock the account
    pub fn unlock(&mut self) {
        self.is_locked = false;
        self.updated_at = Utc::now();
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account() -> Account {
        Account::new("user@example.com", "$2b$12$hash")
    }

    #[test]
    fn test_new_account_defaults() {
        let account = test_account();
        assert_eq!(account.email, "user@example.com");
        assert!(!account.is_staff);
        assert!(!account.is_locked);
        assert!(account.is_active());
        assert!(account.last_login_at.is_none());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_new_staff_account() {
        let account = Account::new_staff("admin@example.com", "$2b$12$hash");
        assert!(account.is_staff);
        assert!(!account.is_locked);
    }

    #[test]
    fn test_lock_and_unlock() {
        let mut account = test_account();
        account.lock();
        assert!(account.is_locked);
        assert!(!account.is_active());

        account.unlock();
        assert!(!account.is_locked);
        assert!(account.is_active());
    }

    #[test]
    fn test_record_login() {
        let mut account = test_account();
        assert!(account.last_login_at.is_none());
        account.record_login();
        assert!(account.last_login_at.is_some());
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut account = test_account();
        let before = account.updated_at;
        account.set_password_hash("$2b$12$other");
        assert_eq!(account.password_hash, "$2b$12$other");
        assert!(account.updated_at >= before);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let account = test_account();
        let json = serde_json::to_string(&account).unwrap();
        let parsed: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, parsed);
    }
}
