use actix_web::{web, HttpRequest, HttpResponse};

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::RevocationStore;

use crate::dto::{LogoutRequest, LogoutResponse};
use crate::handlers::{client_context, extract_language, handle_domain_error};
use crate::i18n::Language;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Signs out one session by revoking the presented refresh token. The
/// matching access token stays valid until it expires. Revoking a token
/// that is already revoked succeeds, so retried logouts are harmless.
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
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid or expired refresh token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let lang = extract_language(&req);
    let ctx = client_context(&req);

    match state
        .auth_service
        .logout(&request.refresh_token, &ctx)
        .await
    {
        Ok(()) => {
            let message = match lang {
                Language::English => "Logged out successfully",
                Language::Chinese => "登出成功",
            };
            HttpResponse::Ok().json(LogoutResponse {
                message: message.to_string(),
            })
        }
        Err(error) => handle_domain_error(&error, &req),
    }
}

/// Handler for POST /api/v1/auth/logout-all
///
/// Signs out every session for the authenticated account by bumping its
/// token generation. All previously issued tokens, access and refresh,
/// stop verifying immediately. Requires a valid access token.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "All sessions signed out"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout_all<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let lang = extract_language(&req);
    let ctx = client_context(&req);

    match state.auth_service.logout_all(auth.account_id, &ctx).await {
        Ok(()) => {
            let message = match lang {
                Language::English => "All sessions signed out",
                Language::Chinese => "所有会话已登出",
            };
            HttpResponse::Ok().json(LogoutResponse {
                message: message.to_string(),
            })
        }
        Err(error) => handle_domain_error(&error, &req),
    }
}
