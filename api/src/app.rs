//! Application factory.
//!
//! Builds the Actix app with its middleware chain and route table; the
//! binary and the integration tests both go through [`create_app`] so
//! they exercise the same wiring.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use signet_core::repositories::{AccountRepository, AuditLogRepository};
use signet_core::services::{AccessTokenVerifier, RevocationStore};
use signet_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors, security::SecurityMiddleware};
use crate::routes::accounts::{events, list, lock, me};
use crate::routes::auth::{login, logout, refresh, register};
use crate::routes::health;
use crate::state::{AppState, HealthState};

/// Create and configure the application with all dependencies
pub fn create_app<U, S, A>(
    app_state: web::Data<AppState<U, S, A>>,
    health_state: web::Data<HealthState>,
    verifier: Arc<dyn AccessTokenVerifier>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: AccountRepository + 'static,
    S: RevocationStore + 'static,
    A: AuditLogRepository + 'static,
{
    let cors = create_cors();
    let security = SecurityMiddleware::new();

    App::new()
        .app_data(app_state)
        .app_data(health_state)
        // Middleware order matters: security first, then CORS, then logging
        .wrap(TracingLogger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::register::<U, S, A>))
                        .route("/login", web::post().to(login::login::<U, S, A>))
                        .route("/refresh", web::post().to(refresh::refresh::<U, S, A>))
                        .route("/logout", web::post().to(logout::logout::<U, S, A>))
                        .route(
                            "/logout-all",
                            web::post()
                                .to(logout::logout_all::<U, S, A>)
                                .wrap(JwtAuth::new(verifier.clone())),
                        ),
                )
                .service(
                    web::scope("/accounts")
                        .wrap(JwtAuth::new(verifier))
                        .route("/me", web::get().to(me::current_account::<U, S, A>))
                        .route("", web::get().to(list::list_accounts::<U, S, A>))
                        .route(
                            "/{id}/lock",
                            web::post().to(lock::lock_account::<U, S, A>),
                        )
                        .route(
                            "/{id}/unlock",
                            web::post().to(lock::unlock_account::<U, S, A>),
                        )
                        .route(
                            "/{id}/events",
                            web::get().to(events::account_events::<U, S, A>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
