//! Domain services.
//!
//! Services hold the business rules and orchestrate repositories and the
//! revocation store. They receive all dependencies explicitly; nothing
//! here reads ambient state.

pub mod audit;
pub mod auth;
pub mod jobs;
pub mod token;

pub use audit::{AuditService, AuditServiceConfig};
pub use auth::AuthService;
pub use jobs::{JobKind, JobQueue, JobRequest, NoOpJobQueue};
pub use token::{AccessTokenVerifier, RevocationStore, TokenCodec, TokenService, TokenServiceConfig};
