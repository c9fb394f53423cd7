//! Authentication response value object

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;

/// The payload returned to a client after successful authentication
/// or token refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn from_token_pair(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}
