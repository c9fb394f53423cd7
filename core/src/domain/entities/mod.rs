//! Domain entities

pub mod account;
pub mod audit;
pub mod token;

pub use account::Account;
pub use audit::{AuditEventType, AuditLog};
pub use token::{
    Claims, TokenPair, TokenType, ACCESS_TOKEN_EXPIRY_SECONDS, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_SECONDS,
};
