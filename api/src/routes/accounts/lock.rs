use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::AccountDto;
use crate::handlers::{client_context, handle_domain_error};
use crate::middleware::auth::StaffAuth;
use crate::state::AppState;

/// Handler for POST /api/v1/accounts/{id}/lock
///
/// Locks an account. Its credentials stop authenticating and every
/// outstanding token fails verification on the next use. Locking an
/// already locked account succeeds without changes. Staff only.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Token does not belong to a staff account
/// - 404 Not Found: No account with that id
pub async fn lock_account<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    auth: StaffAuth,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let account_id = path.into_inner();
    let ctx = client_context(&req);

    match state
        .auth_service
        .lock_account(account_id, auth.0.account_id, &ctx)
        .await
    {
        Ok(account) => HttpResponse::Ok().json(AccountDto::from(account)),
        Err(error) => handle_domain_error(&error, &req),
    }
}

/// Handler for POST /api/v1/accounts/{id}/unlock
///
/// Unlocks a locked account so it can authenticate again. Tokens issued
/// before the lock stay dead if they were revoked; otherwise they resume
/// verifying. Unlocking an unlocked account succeeds without changes.
/// Staff only.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Token does not belong to a staff account
/// - 404 Not Found: No account with that id
pub async fn unlock_account<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    auth: StaffAuth,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let account_id = path.into_inner();
    let ctx = client_context(&req);

    match state
        .auth_service
        .unlock_account(account_id, auth.0.account_id, &ctx)
        .await
    {
        Ok(account) => HttpResponse::Ok().json(AccountDto::from(account)),
        Err(error) => handle_domain_error(&error, &req),
    }
}
