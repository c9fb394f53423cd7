//! Request and response payloads for the HTTP surface.

pub mod account;
pub mod auth;

pub use account::{AccountDto, EventDto, PageQuery};
pub use auth::{
    LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RegisterRequest, SessionResponse,
};
