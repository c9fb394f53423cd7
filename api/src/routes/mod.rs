//! HTTP route handlers, one module per endpoint group.

pub mod accounts;
pub mod auth;
pub mod health;
