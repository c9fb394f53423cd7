//! Token domain types: claims, token pairs, and lifetime constants.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Default access token lifetime: 15 minutes
pub const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 15 * 60;

/// Default refresh token lifetime: 7 days
pub const REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Issuer claim stamped into every token
pub const JWT_ISSUER: &str = "signet";

/// Audience claim stamped into every token
pub const JWT_AUDIENCE: &str = "signet-api";

/// The two token kinds issued as a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT claims carried by both token kinds.
///
/// Every token carries a fresh `jti` and the account's generation at
/// issuance time. Access tokens may additionally embed the account email
/// and staff flag so request handling can avoid a credential-store read;
/// refresh tokens never carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: account id
    pub sub: String,

    /// Issued-at (unix seconds)
    pub iat: i64,

    /// Expiry (unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Unique token id
    pub jti: String,

    /// Token type
    #[serde(rename = "typ")]
    pub token_type: TokenType,

    /// Account generation at issuance
    #[serde(rename = "gen")]
    pub generation: i64,

    /// Account email (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Staff flag (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
}

impl Claims {
    /// Build access token claims
    pub fn new_access(
        account_id: Uuid,
        generation: i64,
        email: impl Into<String>,
        is_staff: bool,
        expiry_seconds: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: account_id.to_string(),
            iat: now,
            exp: now + expiry_seconds,
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
            generation,
            email: Some(email.into()),
            is_staff: Some(is_staff),
        }
    }

    /// Build refresh token claims
    pub fn new_refresh(account_id: Uuid, generation: i64, expiry_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: account_id.to_string(),
            iat: now,
            exp: now + expiry_seconds,
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Refresh,
            generation,
            email: None,
            is_staff: None,
        }
    }

    /// Parse the subject back into an account id
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims)
    }

    /// Whether the token has expired. The boundary is inclusive: a token
    /// expiring exactly now is already expired.
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Seconds of lifetime left, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// An access/refresh token pair as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
