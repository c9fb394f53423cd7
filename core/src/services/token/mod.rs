//! Token issuance, verification, rotation, and revocation

pub mod codec;
pub mod config;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::{AccessTokenVerifier, TokenService};
pub use store::RevocationStore;
