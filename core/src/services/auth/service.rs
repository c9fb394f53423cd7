//! Auth service: registration, login, token refresh, and logout flows.
//!
//! Orchestrates the account repository, the token service, and the
//! optional audit and job-queue collaborators. Password hashing runs on
//! the blocking pool; audit writes and job submission are best-effort
//! and never fail the flow they decorate.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use signet_shared::config::AuthConfig;
use signet_shared::types::{Page, Pagination};
use signet_shared::utils::validation::{self, PasswordStrength};

use crate::domain::entities::account::Account;
use crate::domain::entities::audit::AuditLog;
use crate::domain::value_objects::auth_response::AuthResponse;
use crate::domain::value_objects::request_context::RequestContext;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::account::AccountRepository;
use crate::repositories::audit::{AuditLogRepository, NoOpAuditLogRepository};
use crate::services::audit::AuditService;
use crate::services::jobs::{JobQueue, JobRequest};
use crate::services::token::{RevocationStore, TokenService};

pub struct AuthService<U, S, A = NoOpAuditLogRepository>
where
    U: AccountRepository,
    S: RevocationStore,
    A: AuditLogRepository,
{
    accounts: Arc<U>,
    tokens: Arc<TokenService<S, U>>,
    audit: Option<Arc<AuditService<A>>>,
    jobs: Option<Arc<dyn JobQueue>>,
    config: AuthConfig,
}

impl<U, S> AuthService<U, S>
where
    U: AccountRepository,
    S: RevocationStore,
{
    pub fn new(accounts: Arc<U>, tokens: Arc<TokenService<S, U>>, config: AuthConfig) -> Self {
        Self {
            accounts,
            tokens,
            audit: None,
            jobs: None,
            config,
        }
    }
}

impl<U, S, A> AuthService<U, S, A>
where
    U: AccountRepository,
    S: RevocationStore,
    A: AuditLogRepository,
{
    /// Attach an audit service; events start flowing to its repository
    pub fn with_audit<B: AuditLogRepository>(
        self,
        audit: Arc<AuditService<B>>,
    ) -> AuthService<U, S, B> {
        AuthService {
            accounts: self.accounts,
            tokens: self.tokens,
            audit: Some(audit),
            jobs: self.jobs,
            config: self.config,
        }
    }

    /// Attach a job queue for background work
    pub fn with_jobs(mut self, jobs: Arc<dyn JobQueue>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Register a new account and issue its first token pair
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        ctx: &RequestContext,
    ) -> DomainResult<(Account, AuthResponse)> {
        if !self.config.allow_registration {
            return Err(AuthError::RegistrationDisabled.into());
        }

        let email = validation::normalize_email(email);
        if !validation::is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        match validation::check_password(password, self.config.password.min_length) {
            PasswordStrength::Acceptable => {}
            PasswordStrength::TooShort { min_length } => {
                return Err(ValidationError::weak_password(format!(
                    "must be at least {min_length} characters"
                ))
                .into());
            }
            PasswordStrength::TooSimple => {
                return Err(ValidationError::weak_password(
                    "must contain both letters and digits",
                )
                .into());
            }
        }

        if self.accounts.email_exists(&email).await? {
            return Err(AuthError::AccountAlreadyExists.into());
        }

        let password_hash = self.hash_password(password).await?;
        let account = self.accounts.create(&Account::new(email, password_hash)).await?;

        if let Some(audit) = &self.audit {
            audit.log_account_created(&account, ctx).await;
        }

        let pair = self.tokens.issue_token_pair(&account).await?;
        if let Some(audit) = &self.audit {
            audit.log_token_issued(account.id, ctx).await;
        }

        self.enqueue(JobRequest::welcome_email(account.id, &account.email))
            .await;

        Ok((account, AuthResponse::from_token_pair(pair)))
    }

    /// Authenticate with email and password, issuing a token pair
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ctx: &RequestContext,
    ) -> DomainResult<(Account, AuthResponse)> {
        let email = validation::normalize_email(email);

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                self.audit_login_failure(&email, "unknown email", ctx).await;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if account.is_locked {
            self.audit_login_failure(&email, "account locked", ctx).await;
            return Err(AuthError::AccountLocked.into());
        }

        if !self.verify_password(password, &account.password_hash).await? {
            self.audit_login_failure(&email, "wrong password", ctx).await;
            return Err(AuthError::InvalidCredentials.into());
        }

        self.accounts.update_last_login(account.id).await?;
        let mut account = account;
        account.record_login();

        let pair = self.tokens.issue_token_pair(&account).await?;
        if let Some(audit) = &self.audit {
            audit.log_login_success(&account, ctx).await;
        }

        Ok((account, AuthResponse::from_token_pair(pair)))
    }

    /// Exchange a refresh token for a fresh pair, consuming it
    pub async fn refresh(
        &self,
        refresh_token: &str,
        ctx: &RequestContext,
    ) -> DomainResult<AuthResponse> {
        match self.tokens.refresh_token_pair(refresh_token).await {
            Ok((pair, account)) => {
                if let Some(audit) = &self.audit {
                    audit.log_token_refreshed(account.id, ctx).await;
                }
                Ok(AuthResponse::from_token_pair(pair))
            }
            Err(e) => {
                // replayed or revoked tokens are worth a trail entry
                if matches!(e, DomainError::Token(TokenError::TokenRevoked)) {
                    if let Some(audit) = &self.audit {
                        audit.log_refresh_rejected(ctx).await;
                    }
                }
                Err(e)
            }
        }
    }

    /// Revoke the presented refresh token (sign out this session)
    pub async fn logout(&self, refresh_token: &str, ctx: &RequestContext) -> DomainResult<()> {
        let claims = self.tokens.revoke_refresh_token(refresh_token).await?;

        if let Some(audit) = &self.audit {
            if let Ok(account_id) = claims.account_id() {
                audit.log_logout(account_id, &claims.jti, ctx).await;
            }
        }
        Ok(())
    }

    /// Revoke every outstanding token for the account (sign out all
    /// sessions)
    pub async fn logout_all(&self, account_id: Uuid, ctx: &RequestContext) -> DomainResult<()> {
        let generation = self.tokens.revoke_all_for_account(account_id).await?;

        if let Some(audit) = &self.audit {
            audit
                .log_all_tokens_revoked(account_id, generation, ctx)
                .await;
        }

        self.enqueue(JobRequest::security_alert(
            account_id,
            "all sessions were signed out",
        ))
        .await;

        Ok(())
    }

    /// Lock an account; its tokens stop verifying immediately.
    /// Idempotent when already locked.
    pub async fn lock_account(
        &self,
        account_id: Uuid,
        staff_id: Uuid,
        ctx: &RequestContext,
    ) -> DomainResult<Account> {
        let mut account = self.accounts.get_by_id(account_id).await?;
        if account.is_locked {
            return Ok(account);
        }

        account.lock();
        let account = self.accounts.update(&account).await?;

        if let Some(audit) = &self.audit {
            audit.log_account_locked(account_id, staff_id, ctx).await;
        }
        Ok(account)
    }

    /// Unlock a locked account. Idempotent when not locked.
    pub async fn unlock_account(
        &self,
        account_id: Uuid,
        staff_id: Uuid,
        ctx: &RequestContext,
    ) -> DomainResult<Account> {
        let mut account = self.accounts.get_by_id(account_id).await?;
        if !account.is_locked {
            return Ok(account);
        }

        account.unlock();
        let account = self.accounts.update(&account).await?;

        if let Some(audit) = &self.audit {
            audit.log_account_unlocked(account_id, staff_id, ctx).await;
        }
        Ok(account)
    }

    pub async fn get_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts.get_by_id(account_id).await
    }

    pub async fn list_accounts(&self, pagination: &Pagination) -> DomainResult<Page<Account>> {
        self.accounts.list(pagination).await
    }

    /// Audit trail for one account; empty when auditing is not wired up
    pub async fn account_events(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        match &self.audit {
            Some(audit) => audit.events_for_account(account_id, pagination).await,
            None => Ok(Page::empty()),
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let cost = self.config.password.bcrypt_cost;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hash task failed: {e}")))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("verify task failed: {e}")))?
            .map_err(|e| DomainError::internal(format!("password verification failed: {e}")))
    }

    async fn audit_login_failure(&self, email: &str, reason: &str, ctx: &RequestContext) {
        if let Some(audit) = &self.audit {
            audit.log_login_failure(email, reason, ctx).await;
        }
    }

    async fn enqueue(&self, job: JobRequest) {
        if let Some(jobs) = &self.jobs {
            if let Err(e) = jobs.enqueue(&job).await {
                warn!(error = %e, kind = job.kind.as_str(), "failed to enqueue job");
            }
        }
    }
}
