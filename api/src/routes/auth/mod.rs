//! Authentication route handlers
//!
//! This module contains all authentication endpoints:
//! - Account registration
//! - Email/password login
//! - Token refresh (rotation)
//! - Logout (single session and all sessions)

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
