//! Account repository trait and test double

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;
use crate::repositories::base::{Entity, Repository};

impl Entity for Account {
    fn id(&self) -> Uuid {
        self.id
    }

    fn resource_name() -> &'static str {
        "account"
    }
}

/// Persistence operations specific to accounts, on top of the generic
/// [`Repository`] contract.
#[async_trait]
pub trait AccountRepository: Repository<Account> {
    /// Look up an account by normalized email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Whether an account with this email exists
    async fn email_exists(&self, email: &str) -> DomainResult<bool>;

    /// Stamp the account's last login time to now
    async fn update_last_login(&self, id: Uuid) -> DomainResult<()>;
}
