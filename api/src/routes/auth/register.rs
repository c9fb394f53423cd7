use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::{AccountDto, RegisterRequest, SessionResponse};
use crate::handlers::{client_context, handle_domain_error, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account and signs it in, returning the account together
/// with its first token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "password": "correct-horse-9"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "account": { "id": "...", "email": "alice@example.com", ... },
///     "tokens": {
///         "access_token": "eyJhbGciOiJIUzI1NiIs...",
///         "refresh_token": "eyJhbGciOiJIUzI1NiIs...",
///         "token_type": "Bearer",
///         "expires_in": 900
///     }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or weak password
/// - 403 Forbidden: Registration disabled
/// - 409 Conflict: Email already registered
/// - 503 Service Unavailable: Backing store unreachable
pub async fn register<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, &req);
    }

    let ctx = client_context(&req);
    match state
        .auth_service
        .register(&request.email, &request.password, &ctx)
        .await
    {
        Ok((account, tokens)) => HttpResponse::Created().json(SessionResponse {
            account: AccountDto::from(account),
            tokens,
        }),
        Err(error) => handle_domain_error(&error, &req),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "longenough1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "longenough1".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}
