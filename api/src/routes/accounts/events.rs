use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use signet_core::errors::AuthError;
use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;
use signet_shared::types::PaginatedResponse;

use crate::dto::{EventDto, PageQuery};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/accounts/{id}/events
///
/// Returns the audit trail for an account, newest first. An account can
/// read its own trail; staff can read any.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Requesting another account's trail without staff
pub async fn account_events<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let account_id = path.into_inner();
    if auth.account_id != account_id && !auth.is_staff {
        return handle_domain_error(&AuthError::InsufficientPermissions.into(), &req);
    }

    let pagination = query.pagination();
    match state
        .auth_service
        .account_events(account_id, &pagination)
        .await
    {
        Ok(page) => {
            let page = page.map(EventDto::from);
            HttpResponse::Ok().json(PaginatedResponse::from_page(page, pagination))
        }
        Err(error) => handle_domain_error(&error, &req),
    }
}
