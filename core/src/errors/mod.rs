//! Domain error taxonomy.
//!
//! Leaf error enums describe what went wrong within one concern
//! ([`AuthError`], [`TokenError`], [`ValidationError`]); [`DomainError`]
//! is the single type every service returns, bridging the leaves via
//! transparent conversions.

pub mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Top-level error returned by all domain services
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Authentication or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Token issuance or verification failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Input validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// A uniqueness constraint was violated
    #[error("{resource} already exists")]
    Conflict { resource: String },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// A backing service is temporarily unreachable; the caller may retry
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        DomainError::Conflict {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        DomainError::Unavailable {
            message: message.into(),
        }
    }

    /// Whether retrying the same call may succeed. Only transient
    /// infrastructure outages qualify; every other kind is deterministic.
    pub fn is_retriable(&self) -> bool {
        matches!(self, DomainError::Unavailable { .. })
    }
}

/// Result alias used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;
