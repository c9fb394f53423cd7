//! Per-request context passed explicitly into services.
//!
//! Services never reach for ambient request state; whatever the caller
//! knows about the client travels in this struct.

use serde::{Deserialize, Serialize};

/// Client metadata for the current request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Client IP address, if known
    pub ip_address: Option<String>,
    /// Client user agent, if known
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }

    /// Context with no client metadata, for internal callers
    pub fn empty() -> Self {
        Self::default()
    }
}
