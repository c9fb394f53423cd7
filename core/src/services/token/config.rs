//! Token service configuration

use signet_shared::config::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_SECONDS, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_SECONDS,
};

/// Settings controlling token issuance and verification
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,

    /// Refresh token lifetime in seconds. Also used as the TTL for
    /// revocation entries and generation counters, so the registry
    /// outlives every token it covers.
    pub refresh_token_expiry_seconds: i64,

    /// Issuer claim to stamp and require
    pub issuer: String,

    /// Audience claim to stamp and require
    pub audience: String,

    /// Record every issued jti in the store (observability only)
    pub track_issued_tokens: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiry_seconds: ACCESS_TOKEN_EXPIRY_SECONDS,
            refresh_token_expiry_seconds: REFRESH_TOKEN_EXPIRY_SECONDS,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            track_issued_tokens: false,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Build from the application JWT configuration
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_expiry_seconds: config.access_token_expiry_seconds,
            refresh_token_expiry_seconds: config.refresh_token_expiry_seconds,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            track_issued_tokens: config.track_issued_tokens,
        }
    }

    pub fn with_access_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry_seconds = seconds;
        self
    }

    pub fn with_refresh_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry_seconds = seconds;
        self
    }

    pub fn with_issued_tracking(mut self, track: bool) -> Self {
        self.track_issued_tokens = track;
        self
    }
}
