//! MySQL implementation of the account repository.
//!
//! Accounts live in the `accounts` table; ids are stored as CHAR(36)
//! UUID strings. Uniqueness of emails is enforced by the database and
//! surfaces as a conflict error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use signet_core::domain::entities::account::Account;
use signet_core::errors::{DomainError, DomainResult};
use signet_core::repositories::{AccountRepository, Repository};
use signet_shared::types::{Page, Pagination};

use super::super::classify_sqlx_error;

const COLUMNS: &str =
    "id, email, password_hash, is_staff, is_locked, created_at, updated_at, last_login_at";

pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> DomainResult<Account> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid account UUID: {e}")))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            is_staff: row
                .try_get("is_staff")
                .map_err(|e| column_error("is_staff", e))?,
            is_locked: row
                .try_get("is_locked")
                .map_err(|e| column_error("is_locked", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| column_error("last_login_at", e))?,
        })
    }

    async fn insert(
        &self,
        executor: impl sqlx::MySqlExecutor<'_>,
        account: &Account,
    ) -> DomainResult<()> {
        let query = format!("INSERT INTO accounts ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)");
        sqlx::query(&query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_staff)
            .bind(account.is_locked)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(executor)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Account> for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Account>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id IN ({placeholders})");

        let mut q = sqlx::query(&query);
        for id in ids {
            q = q.bind(id.to_string());
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn list(&self, pagination: &Pagination) -> DomainResult<Page<Account>> {
        let total = self.count().await?;

        let query =
            format!("SELECT {COLUMNS} FROM accounts ORDER BY created_at ASC LIMIT ? OFFSET ?");
        let rows = sqlx::query(&query)
            .bind(pagination.limit() as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        let items = rows
            .iter()
            .map(Self::row_to_account)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(items, total))
    }

    async fn count(&self) -> DomainResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        let count: i64 = row.try_get("count").map_err(|e| column_error("count", e))?;
        Ok(count as u64)
    }

    async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?) AS present")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| column_error("present", e))?;
        Ok(present == 1)
    }

    async fn create(&self, entity: &Account) -> DomainResult<Account> {
        self.insert(&self.pool, entity).await?;
        Ok(entity.clone())
    }

    async fn create_many(&self, entities: &[Account]) -> DomainResult<Vec<Account>> {
        // all-or-nothing: one transaction around the whole batch
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        for entity in entities {
            self.insert(&mut *tx, entity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;
        Ok(entities.to_vec())
    }

    async fn update(&self, entity: &Account) -> DomainResult<Account> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = ?, password_hash = ?, is_staff = ?, is_locked = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.email)
        .bind(&entity.password_hash)
        .bind(entity.is_staff)
        .bind(entity.is_locked)
        .bind(entity.updated_at)
        .bind(entity.last_login_at)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "account"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("account"));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "account"))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| column_error("present", e))?;
        Ok(present == 1)
    }

    async fn update_last_login(&self, id: Uuid) -> DomainResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE accounts SET last_login_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "account"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("account"));
        }
        Ok(())
    }
}

fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::internal(format!("failed to read {column}: {err}"))
}
