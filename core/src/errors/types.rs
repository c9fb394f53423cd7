//! Leaf error enums for individual domain concerns

use thiserror::Error;

/// Authentication and authorization failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair did not match an active account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but has been locked
    #[error("Account is locked")]
    AccountLocked,

    /// Registration attempted with an email already in use
    #[error("An account with this email already exists")]
    AccountAlreadyExists,

    /// Catch-all authentication failure presented to clients
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Authenticated but not allowed to perform the action
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Self-service registration is disabled by configuration
    #[error("Registration is currently disabled")]
    RegistrationDisabled,
}

/// Token issuance and verification failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    /// Token is not three base64url segments, or otherwise unparseable
    #[error("Malformed token")]
    InvalidTokenFormat,

    #[error("Invalid token signature")]
    InvalidSignature,

    /// Claims decoded but failed semantic checks (issuer, audience, subject)
    #[error("Invalid token claims")]
    InvalidClaims,

    /// A token of one kind was presented where the other was required
    #[error("Expected {expected} token, got {actual}")]
    WrongTokenType { expected: String, actual: String },

    /// Token was revoked, or its generation predates a revoke-all
    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Failed to generate token: {message}")]
    TokenGenerationFailed { message: String },

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

impl TokenError {
    pub fn wrong_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        TokenError::WrongTokenType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        TokenError::TokenGenerationFailed {
            message: message.into(),
        }
    }
}

/// Input validation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password too weak: {reason}")]
    WeakPassword { reason: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    pub fn weak_password(reason: impl Into<String>) -> Self {
        ValidationError::WeakPassword {
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(AuthError::AccountLocked.to_string(), "Account is locked");
    }

    #[test]
    fn test_wrong_token_type_message() {
        let err = TokenError::wrong_type("refresh", "access");
        assert_eq!(err.to_string(), "Expected refresh token, got access");
    }

    #[test]
    fn test_weak_password_message() {
        let err = ValidationError::weak_password("must contain a digit");
        assert_eq!(err.to_string(), "Password too weak: must contain a digit");
    }
}
