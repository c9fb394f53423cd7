//! Shared test doubles and app construction for the API tests.
//!
//! The doubles here back the full HTTP stack with in-process state so
//! flows run end to end without MySQL or Redis.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use signet_api::state::{AppState, HealthState};
use signet_core::domain::entities::{Account, AuditEventType, AuditLog};
use signet_core::errors::{DomainError, DomainResult};
use signet_core::repositories::{AccountRepository, AuditLogRepository, Repository};
use signet_core::services::{
    AccessTokenVerifier, AuditService, AuthService, RevocationStore, TokenService,
    TokenServiceConfig,
};
use signet_shared::config::{AuthConfig, JwtConfig, PasswordConfig};
use signet_shared::types::{Page, Pagination};

/// In-memory account store
#[derive(Clone, Default)]
pub struct InMemoryAccounts {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing registration
    pub fn seed(&self, account: Account) {
        self.accounts.lock().unwrap().insert(account.id, account);
    }
}

#[async_trait]
impl Repository<Account> for InMemoryAccounts {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(ids.iter().filter_map(|id| accounts.get(id).cloned()).collect())
    }

    async fn list(&self, pagination: &Pagination) -> DomainResult<Page<Account>> {
        let accounts = self.accounts.lock().unwrap();
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(Page::new(items, total))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.accounts.lock().unwrap().len() as u64)
    }

    async fn create(&self, entity: &Account) -> DomainResult<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == entity.email) {
            return Err(DomainError::conflict("account"));
        }
        accounts.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn create_many(&self, entities: &[Account]) -> DomainResult<Vec<Account>> {
        for entity in entities {
            self.create(entity).await?;
        }
        Ok(entities.to_vec())
    }

    async fn update(&self, entity: &Account) -> DomainResult<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.contains_key(&entity.id) {
            return Err(DomainError::not_found("account"));
        }
        accounts.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.accounts.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn update_last_login(&self, id: Uuid) -> DomainResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("account"))?;
        account.last_login_at = Some(Utc::now());
        Ok(())
    }
}

/// In-memory revocation registry
#[derive(Clone, Default)]
pub struct InMemoryStore {
    revoked: Arc<Mutex<HashSet<String>>>,
    generations: Arc<Mutex<HashMap<Uuid, i64>>>,
}

#[async_trait]
impl RevocationStore for InMemoryStore {
    async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        Ok(self.revoked.lock().unwrap().contains(jti))
    }

    async fn revoke(&self, jti: &str, _ttl_seconds: i64) -> DomainResult<bool> {
        Ok(self.revoked.lock().unwrap().insert(jti.to_string()))
    }

    async fn current_generation(&self, account_id: Uuid) -> DomainResult<i64> {
        Ok(*self.generations.lock().unwrap().get(&account_id).unwrap_or(&0))
    }

    async fn bump_generation(&self, account_id: Uuid, _ttl_seconds: i64) -> DomainResult<i64> {
        let mut generations = self.generations.lock().unwrap();
        let next = generations.get(&account_id).unwrap_or(&0) + 1;
        generations.insert(account_id, next);
        Ok(next)
    }

    async fn record_issued(
        &self,
        _jti: &str,
        _account_id: Uuid,
        _ttl_seconds: i64,
    ) -> DomainResult<()> {
        Ok(())
    }
}

/// In-memory audit trail
#[derive(Clone, Default)]
pub struct InMemoryAudit {
    logs: Arc<Mutex<Vec<AuditLog>>>,
}

impl InMemoryAudit {
    pub fn entries(&self) -> Vec<AuditLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAudit {
    async fn create(&self, log: &AuditLog) -> DomainResult<()> {
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn find_by_account(
        &self,
        account_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Page<AuditLog>> {
        let logs = self.logs.lock().unwrap();
        let mut matching: Vec<AuditLog> = logs
            .iter()
            .filter(|log| log.account_id == Some(account_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(Page::new(items, total))
    }

    async fn find_by_event_type(
        &self,
        event_type: AuditEventType,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .iter()
            .filter(|log| log.event_type == event_type)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_recent_failures(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .iter()
            .filter(|log| {
                log.account_id == Some(account_id) && !log.success && log.created_at >= since
            })
            .count() as u64)
    }
}

/// Everything a test needs to stand up the app and reach behind it
pub struct TestHarness {
    pub app_state: web::Data<AppState<InMemoryAccounts, InMemoryStore, InMemoryAudit>>,
    pub health_state: web::Data<HealthState>,
    pub verifier: Arc<dyn AccessTokenVerifier>,
    pub accounts: Arc<InMemoryAccounts>,
    pub audit: Arc<InMemoryAudit>,
}

/// Build the service graph on in-memory doubles
pub fn harness() -> TestHarness {
    let accounts = Arc::new(InMemoryAccounts::new());
    let store = Arc::new(InMemoryStore::default());
    let audit_repository = Arc::new(InMemoryAudit::default());

    let jwt = JwtConfig::new("integration-test-secret");
    let token_service = Arc::new(TokenService::new(
        store,
        accounts.clone(),
        TokenServiceConfig::from_jwt_config(&jwt),
    ));

    let config = AuthConfig {
        jwt,
        password: PasswordConfig {
            // low cost keeps the hashing fast in tests
            bcrypt_cost: 4,
            min_length: 8,
        },
        allow_registration: true,
    };

    let auth_service = Arc::new(
        AuthService::new(accounts.clone(), token_service.clone(), config)
            .with_audit(Arc::new(AuditService::new(audit_repository.clone()))),
    );

    let verifier: Arc<dyn AccessTokenVerifier> = token_service;

    TestHarness {
        app_state: web::Data::new(AppState::new(auth_service)),
        health_state: web::Data::new(HealthState::disconnected()),
        verifier,
        accounts,
        audit: audit_repository,
    }
}

/// A bcrypt hash usable by seeded accounts; cost 4 to stay fast
pub fn hash_for_tests(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}

/// Drive the app the way the HTTP dispatcher would: a service-level
/// error (a middleware rejection) is rendered into its HTTP response
/// instead of panicking the harness like [`test::call_service`] does.
pub async fn call_rendered<S, R, B>(app: &S, req: R) -> ServiceResponse<BoxBody>
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    match test::try_call_service(app, req).await {
        Ok(response) => response.map_into_boxed_body(),
        Err(error) => ServiceResponse::new(
            test::TestRequest::default().to_http_request(),
            error.error_response(),
        ),
    }
}
