//! Token service: the lifecycle of access/refresh token pairs.
//!
//! Issuance stamps both tokens with a fresh `jti` and the account's
//! current generation. Verification layers checks from cheapest to most
//! expensive: signature and standard claims, token type, generation,
//! then (refresh only) the per-token revocation entry, then account
//! status. Refresh always rotates: the presented token is revoked before
//! the new pair is released, so a refresh token is spendable exactly
//! once.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::account::AccountRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::store::RevocationStore;

/// Verifies access tokens end to end. Implemented by [`TokenService`];
/// the HTTP layer depends on this trait so middleware stays decoupled
/// from the service's type parameters.
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    /// Fully verify an access token: signature, standard claims,
    /// generation, and account status.
    async fn verify_access_token(&self, token: &str) -> DomainResult<Claims>;
}

pub struct TokenService<S, A>
where
    S: RevocationStore,
    A: AccountRepository,
{
    store: Arc<S>,
    accounts: Arc<A>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<S, A> TokenService<S, A>
where
    S: RevocationStore,
    A: AccountRepository,
{
    pub fn new(store: Arc<S>, accounts: Arc<A>, config: TokenServiceConfig) -> Self {
        let codec = TokenCodec::new(&config.secret, &config.issuer, &config.audience);
        Self {
            store,
            accounts,
            codec,
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issue a fresh pair for an account at its current generation
    pub async fn issue_token_pair(&self, account: &Account) -> DomainResult<TokenPair> {
        let generation = self.store.current_generation(account.id).await?;
        self.mint_pair(account, generation).await
    }

    /// Verify an access token.
    ///
    /// Consults the generation counter and the credential store but never
    /// the per-token revocation entries; individual revocation only
    /// applies to refresh tokens.
    pub async fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.codec.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(TokenError::wrong_type("access", claims.token_type.as_str()).into());
        }

        let account_id = claims.account_id()?;
        let current = self.store.current_generation(account_id).await?;
        if claims.generation < current {
            return Err(TokenError::TokenRevoked.into());
        }

        self.check_account_active(account_id).await?;
        Ok(claims)
    }

    /// Verify a refresh token without consuming it
    pub async fn verify_refresh_token(&self, token: &str) -> DomainResult<Claims> {
        let (claims, _, _) = self.check_refresh(token).await?;
        Ok(claims)
    }

    /// Rotate: verify the presented refresh token, mint a new pair, and
    /// revoke the old token before releasing the new pair.
    ///
    /// Of two concurrent refreshes of the same token exactly one
    /// succeeds; the loser's freshly minted pair is discarded and the
    /// call fails as revoked. A store failure while revoking fails the
    /// whole operation rather than leave the old token spendable.
    pub async fn refresh_token_pair(
        &self,
        refresh_token: &str,
    ) -> DomainResult<(TokenPair, Account)> {
        let (old_claims, account, generation) = self.check_refresh(refresh_token).await?;

        let pair = self.mint_pair(&account, generation).await?;

        let ttl = old_claims.remaining_seconds().max(1);
        if !self.store.revoke(&old_claims.jti, ttl).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        Ok((pair, account))
    }

    /// Revoke the presented refresh token (logout). Idempotent: revoking
    /// a token that is already revoked succeeds.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<Claims> {
        let claims = self.codec.decode(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(TokenError::wrong_type("refresh", claims.token_type.as_str()).into());
        }

        let ttl = claims.remaining_seconds().max(1);
        self.store.revoke(&claims.jti, ttl).await?;
        Ok(claims)
    }

    /// Invalidate every outstanding token for an account by bumping its
    /// generation (logout everywhere). Returns the new generation.
    pub async fn revoke_all_for_account(&self, account_id: Uuid) -> DomainResult<i64> {
        self.store
            .bump_generation(account_id, self.config.refresh_token_expiry_seconds)
            .await
    }

    /// Shared refresh-side checks, ordered so a revoke-all overrides
    /// per-token state: generation first, then the jti entry, then the
    /// account itself. Returns the claims, the account, and the current
    /// generation so rotation can mint at it.
    async fn check_refresh(&self, token: &str) -> DomainResult<(Claims, Account, i64)> {
        let claims = self.codec.decode(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(TokenError::wrong_type("refresh", claims.token_type.as_str()).into());
        }

        let account_id = claims.account_id()?;
        let current = self.store.current_generation(account_id).await?;
        if claims.generation < current {
            return Err(TokenError::TokenRevoked.into());
        }
        if self.store.is_revoked(&claims.jti).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        let account = self.check_account_active(account_id).await?;
        Ok((claims, account, current))
    }

    async fn check_account_active(&self, account_id: Uuid) -> DomainResult<Account> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;
        if account.is_locked {
            return Err(AuthError::AccountLocked.into());
        }
        Ok(account)
    }

    async fn mint_pair(&self, account: &Account, generation: i64) -> DomainResult<TokenPair> {
        let access_claims = Claims::new_access(
            account.id,
            generation,
            account.email.as_str(),
            account.is_staff,
            self.config.access_token_expiry_seconds,
        );
        let refresh_claims =
            Claims::new_refresh(account.id, generation, self.config.refresh_token_expiry_seconds);

        let access_token = self.codec.encode(&access_claims)?;
        let refresh_token = self.codec.encode(&refresh_claims)?;

        if self.config.track_issued_tokens {
            // observability only, never fails issuance
            for claims in [&access_claims, &refresh_claims] {
                let ttl = claims.exp - claims.iat;
                if let Err(e) = self.store.record_issued(&claims.jti, account.id, ttl).await {
                    warn!(error = %e, jti = %claims.jti, "failed to record issued token");
                }
            }
        }

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
            self.config.refresh_token_expiry_seconds,
        ))
    }
}

#[async_trait]
impl<S, A> AccessTokenVerifier for TokenService<S, A>
where
    S: RevocationStore,
    A: AccountRepository,
{
    async fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        TokenService::verify_access_token(self, token).await
    }
}
