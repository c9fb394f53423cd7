use serde::{Deserialize, Serialize};
use validator::Validate;

use signet_core::domain::value_objects::AuthResponse;

use crate::dto::account::AccountDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed server-side before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Returned by register and login: the account plus its first token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub account: AccountDto,
    pub tokens: AuthResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
