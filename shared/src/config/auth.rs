//! Authentication configuration module

use serde::{Deserialize, Serialize};

use crate::utils::duration::parse_duration;

const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Signing secret (HMAC). Must be overridden outside development.
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,

    /// Token issuer claim
    pub issuer: String,

    /// Token audience claim
    pub audience: String,

    /// Signing algorithm name (HS256 by default)
    pub algorithm: String,

    /// Record issued refresh token ids in the registry for auditing
    #[serde(default)]
    pub track_issued_tokens: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry_seconds: 15 * 60,
            refresh_token_expiry_seconds: 7 * 24 * 60 * 60,
            issuer: String::from("signet"),
            audience: String::from("signet-api"),
            algorithm: String::from("HS256"),
            track_issued_tokens: false,
        }
    }
}

impl JwtConfig {
    /// Create a new configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_seconds = minutes * 60;
        self
    }

    /// Set the refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_seconds = days * 24 * 60 * 60;
        self
    }

    /// True when the placeholder development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Create from environment variables.
    ///
    /// Token lifetimes accept unit suffixes: `900s`, `15m`, `12h`, `7d`,
    /// or a bare number of seconds.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_expiry_seconds = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_duration(&v).ok())
            .unwrap_or(defaults.access_token_expiry_seconds);
        let refresh_token_expiry_seconds = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_duration(&v).ok())
            .unwrap_or(defaults.refresh_token_expiry_seconds);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience);
        let track_issued_tokens = std::env::var("JWT_TRACK_ISSUED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            secret,
            access_token_expiry_seconds,
            refresh_token_expiry_seconds,
            issuer,
            audience,
            track_issued_tokens,
            ..defaults
        }
    }
}

/// Password hashing and strength configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_length: 8,
        }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.bcrypt_cost);
        let min_length = std::env::var("PASSWORD_MIN_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_length);

        Self {
            bcrypt_cost,
            min_length,
        }
    }
}

/// Combined authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password configuration
    pub password: PasswordConfig,

    /// Whether new accounts may be provisioned through the public API
    #[serde(default = "default_allow_registration")]
    pub allow_registration: bool,
}

fn default_allow_registration() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            allow_registration: true,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let allow_registration = std::env::var("ALLOW_REGISTRATION")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self {
            jwt: JwtConfig::from_env(),
            password: PasswordConfig::from_env(),
            allow_registration,
        }
    }
}
