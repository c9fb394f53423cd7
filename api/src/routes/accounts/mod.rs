//! Account management route handlers
//!
//! The current-account endpoint is available to any authenticated
//! session; listing, locking, and unlocking require a staff token; the
//! event trail is visible to the account owner and to staff.

pub mod events;
pub mod list;
pub mod lock;
pub mod me;
