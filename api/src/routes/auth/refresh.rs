use actix_web::{web, HttpRequest, HttpResponse};

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::RefreshRequest;
use crate::handlers::{client_context, handle_domain_error};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a fresh token pair. The presented token
/// is consumed: it is revoked before the new pair is returned, so the
/// same token cannot be exchanged twice.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, revoked, or replayed token
/// - 403 Forbidden: Account locked
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let ctx = client_context(&req);
    match state
        .auth_service
        .refresh(&request.refresh_token, &ctx)
        .await
    {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(error) => handle_domain_error(&error, &req),
    }
}
