use actix_web::{web, HttpRequest, HttpResponse};

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::AccountDto;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/accounts/me
///
/// Returns the account behind the presented access token.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: Account was deleted after the token was issued
pub async fn current_account<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    match state.auth_service.get_account(auth.account_id).await {
        Ok(account) => HttpResponse::Ok().json(AccountDto::from(account)),
        Err(error) => handle_domain_error(&error, &req),
    }
}
