//! Behavioral tests for issuance, verification, rotation, and
//! revocation against mock collaborators.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::account::mock::MockAccountRepository;
use crate::repositories::Repository;
use crate::services::token::codec::TokenCodec;
use crate::services::token::store::mock::{MockRevocationStore, StoreCall};
use crate::services::token::{TokenService, TokenServiceConfig};

type TestService = TokenService<MockRevocationStore, MockAccountRepository>;

fn setup() -> (Arc<MockRevocationStore>, Arc<MockAccountRepository>, TestService, Account) {
    setup_with(TokenServiceConfig::new("test-secret"))
}

fn setup_with(
    config: TokenServiceConfig,
) -> (Arc<MockRevocationStore>, Arc<MockAccountRepository>, TestService, Account) {
    let store = Arc::new(MockRevocationStore::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let account = Account::new("user@example.com", "$2b$12$hash");
    accounts.add_account(account.clone());
    let service = TokenService::new(store.clone(), accounts.clone(), config);
    (store, accounts, service, account)
}

#[tokio::test]
async fn test_issued_pair_carries_account_and_generation() {
    let (_, _, service, account) = setup();

    let pair = service.issue_token_pair(&account).await.unwrap();

    let access = service.verify_access_token(&pair.access_token).await.unwrap();
    assert_eq!(access.sub, account.id.to_string());
    assert_eq!(access.email.as_deref(), Some("user@example.com"));
    assert_eq!(access.is_staff, Some(false));
    assert_eq!(access.generation, 0);

    let refresh = service.verify_refresh_token(&pair.refresh_token).await.unwrap();
    assert_eq!(refresh.generation, 0);
    assert!(refresh.email.is_none());
    assert_ne!(access.jti, refresh.jti);
}

#[tokio::test]
async fn test_issue_uses_current_generation() {
    let (store, _, service, account) = setup();
    store.set_generation(account.id, 5);

    let pair = service.issue_token_pair(&account).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).await.unwrap();
    assert_eq!(claims.generation, 5);
}

#[tokio::test]
async fn test_access_verification_rejects_refresh_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    let err = service
        .verify_access_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::WrongTokenType { .. })
    ));
}

#[tokio::test]
async fn test_refresh_verification_rejects_access_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    let err = service
        .verify_refresh_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::WrongTokenType { .. })
    ));
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (_, _, service, _) = setup();
    let err = service.verify_access_token("garbage").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidTokenFormat)
    ));
}

#[tokio::test]
async fn test_expired_refresh_token_rejected() {
    let (_, _, service, account) = setup();

    let codec = TokenCodec::new("test-secret", JWT_ISSUER, JWT_AUDIENCE);
    let mut claims = Claims::new_refresh(account.id, 0, 600);
    claims.iat = Utc::now().timestamp() - 700;
    claims.exp = Utc::now().timestamp() - 100;
    let token = codec.encode(&claims).unwrap();

    let err = service.verify_refresh_token(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
}

#[tokio::test]
async fn test_generation_bump_invalidates_access_tokens() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    let new_generation = service.revoke_all_for_account(account.id).await.unwrap();
    assert_eq!(new_generation, 1);

    let err = service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_generation_bump_invalidates_refresh_tokens() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    service.revoke_all_for_account(account.id).await.unwrap();

    let err = service
        .verify_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_tokens_issued_after_bump_are_valid() {
    let (_, _, service, account) = setup();
    service.revoke_all_for_account(account.id).await.unwrap();

    let pair = service.issue_token_pair(&account).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).await.unwrap();
    assert_eq!(claims.generation, 1);
}

#[tokio::test]
async fn test_access_verification_reads_no_per_token_state() {
    let (store, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    store.clear_calls();
    service.verify_access_token(&pair.access_token).await.unwrap();

    let calls = store.calls();
    assert!(calls.contains(&StoreCall::CurrentGeneration(account.id)));
    assert!(!calls.iter().any(|c| matches!(c, StoreCall::IsRevoked(_))));
}

#[tokio::test]
async fn test_locked_account_fails_access_verification() {
    let (_, accounts, service, mut account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    account.lock();
    accounts.add_account(account);

    let err = service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountLocked)));
}

#[tokio::test]
async fn test_locked_account_fails_refresh() {
    let (_, accounts, service, mut account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    account.lock();
    accounts.add_account(account);

    let err = service
        .refresh_token_pair(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountLocked)));
}

#[tokio::test]
async fn test_missing_account_fails_verification() {
    let (_, accounts, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    accounts.delete(account.id).await.unwrap();

    let err = service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn test_refresh_rotates_and_consumes_old_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    let (new_pair, refreshed_account) =
        service.refresh_token_pair(&pair.refresh_token).await.unwrap();
    assert_eq!(refreshed_account.id, account.id);
    assert_ne!(new_pair.refresh_token, pair.refresh_token);

    // the new pair works
    service.verify_access_token(&new_pair.access_token).await.unwrap();
    service.verify_refresh_token(&new_pair.refresh_token).await.unwrap();

    // replaying the consumed token fails
    let err = service
        .refresh_token_pair(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_stale_generation_short_circuits_before_jti_lookup() {
    let (store, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();
    let claims = service.verify_refresh_token(&pair.refresh_token).await.unwrap();

    // both conditions hold; the generation check must win without
    // touching per-token state
    store.add_revoked(&claims.jti);
    store.set_generation(account.id, claims.generation + 1);
    store.clear_calls();

    let err = service
        .refresh_token_pair(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
    assert!(!store.calls().iter().any(|c| matches!(c, StoreCall::IsRevoked(_))));
}

#[tokio::test]
async fn test_refresh_fails_closed_when_revoke_write_fails() {
    let (store, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    store.set_fail_revoke(true);
    let err = service
        .refresh_token_pair(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(err.is_retriable());

    // the old token was not consumed by the failed attempt
    store.set_fail_revoke(false);
    service.verify_refresh_token(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_refresh_lost_race_discards_minted_pair() {
    let (store, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    store.set_lose_revoke_race(true);
    let err = service
        .refresh_token_pair(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    service.revoke_refresh_token(&pair.refresh_token).await.unwrap();

    let err = service
        .verify_refresh_token(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    service.revoke_refresh_token(&pair.refresh_token).await.unwrap();
    service.revoke_refresh_token(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_logout_rejects_access_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    let err = service
        .revoke_refresh_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::WrongTokenType { .. })
    ));
}

#[tokio::test]
async fn test_logout_does_not_invalidate_access_token() {
    let (_, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    service.revoke_refresh_token(&pair.refresh_token).await.unwrap();

    // access tokens ride out their short lifetime
    service.verify_access_token(&pair.access_token).await.unwrap();
}

#[tokio::test]
async fn test_revoke_all_increments_generation() {
    let (_, _, service, account) = setup();

    assert_eq!(service.revoke_all_for_account(account.id).await.unwrap(), 1);
    assert_eq!(service.revoke_all_for_account(account.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_issued_tracking_records_both_jtis() {
    let config = TokenServiceConfig::new("test-secret").with_issued_tracking(true);
    let (store, _, service, account) = setup_with(config);

    service.issue_token_pair(&account).await.unwrap();

    let issued = store.issued();
    assert_eq!(issued.len(), 2);
    assert!(issued.iter().all(|(_, id)| *id == account.id));
}

#[tokio::test]
async fn test_issued_tracking_failure_does_not_fail_issuance() {
    let config = TokenServiceConfig::new("test-secret").with_issued_tracking(true);
    let (store, _, service, account) = setup_with(config);

    store.set_fail_record_issued(true);
    let pair = service.issue_token_pair(&account).await.unwrap();
    service.verify_access_token(&pair.access_token).await.unwrap();
}

#[tokio::test]
async fn test_store_outage_is_retriable() {
    let (store, _, service, account) = setup();
    let pair = service.issue_token_pair(&account).await.unwrap();

    store.set_should_fail(true);
    let err = service
        .verify_access_token(&pair.access_token)
        .await
        .unwrap_err();
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_tokens_are_account_scoped() {
    let (_, accounts, service, account) = setup();
    let other = Account::new("other@example.com", "$2b$12$hash");
    accounts.add_account(other.clone());

    let pair = service.issue_token_pair(&account).await.unwrap();

    // bumping the other account leaves this account's tokens alone
    service.revoke_all_for_account(other.id).await.unwrap();
    service.verify_access_token(&pair.access_token).await.unwrap();
}
