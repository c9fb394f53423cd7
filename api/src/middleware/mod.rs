//! HTTP middleware: authentication, CORS, and security policies.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{AuthContext, JwtAuth, StaffAuth};
pub use cors::create_cors;
pub use security::SecurityMiddleware;
