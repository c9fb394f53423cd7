//! HTTP surface for the Signet authentication service.
//!
//! Exposes registration, login, token refresh and session revocation
//! under `/api/v1/auth`, and account administration under
//! `/api/v1/accounts`. Handlers stay thin: they parse and validate the
//! request, call into [`signet_core`] services, and translate domain
//! errors to localized HTTP responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod state;
