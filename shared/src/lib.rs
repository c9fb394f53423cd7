//! Shared utilities and common types for the Signet server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (validation, duration parsing)
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{Language, Page, PaginatedResponse, Pagination};
pub use utils::{duration, validation};
