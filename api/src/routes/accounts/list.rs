use actix_web::{web, HttpRequest, HttpResponse};

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;
use signet_shared::types::PaginatedResponse;

use crate::dto::{AccountDto, PageQuery};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::StaffAuth;
use crate::state::AppState;

/// Handler for GET /api/v1/accounts
///
/// Lists accounts one page at a time, oldest first. Staff only.
///
/// # Query Parameters
///
/// - `page`: 1-based page number (default 1)
/// - `per_page`: items per page (default 20, max 100)
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Token does not belong to a staff account
pub async fn list_accounts<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    _auth: StaffAuth,
    query: web::Query<PageQuery>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let pagination = query.pagination();
    match state.auth_service.list_accounts(&pagination).await {
        Ok(page) => {
            let page = page.map(AccountDto::from);
            HttpResponse::Ok().json(PaginatedResponse::from_page(page, pagination))
        }
        Err(error) => handle_domain_error(&error, &req),
    }
}
