use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::{AccountDto, LoginRequest, SessionResponse};
use crate::handlers::{client_context, handle_domain_error, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with email and password and issues a token pair.
///
/// # Response
///
/// ## Success (200 OK)
/// Same shape as register: the account plus a fresh token pair.
///
/// ## Errors
/// - 400 Bad Request: Malformed request data
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 403 Forbidden: Account locked
/// - 503 Service Unavailable: Backing store unreachable
pub async fn login<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password, &ctx)
        .await
    {
        Ok((account, tokens)) => HttpResponse::Ok().json(SessionResponse {
            account: AccountDto::from(account),
            tokens,
        }),
        Err(error) => handle_domain_error(&error, &req),
    }
}
