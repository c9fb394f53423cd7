//! Value objects shared across the domain layer

pub mod auth_response;
pub mod request_context;

pub use auth_response::AuthResponse;
pub use request_context::RequestContext;
