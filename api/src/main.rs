//! Signet API server binary.
//!
//! Wires the MySQL repositories, the Redis revocation registry, and the
//! domain services together, then serves the HTTP API until shutdown.

use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use signet_api::app::create_app;
use signet_api::state::{AppState, HealthState};
use signet_core::services::{
    AccessTokenVerifier, AuditService, AuthService, JobQueue, TokenService, TokenServiceConfig,
};
use signet_infra::cache::{RedisClient, RedisRevocationStore};
use signet_infra::database::{DatabasePool, MySqlAccountRepository, MySqlAuditLogRepository};
use signet_infra::jobs::RedisJobQueue;
use signet_shared::config::{AppConfig, LogFormat};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config);

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Signet API server"
    );

    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "JWT_SECRET must be set in production",
        ));
    }

    let pool = DatabasePool::connect(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let redis = RedisClient::new(config.cache.clone())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let accounts = Arc::new(MySqlAccountRepository::new(pool.pool()));
    let audit_repository = Arc::new(MySqlAuditLogRepository::new(pool.pool()));
    let store = Arc::new(RedisRevocationStore::new(redis.clone()));

    let token_service = Arc::new(TokenService::new(
        store,
        accounts.clone(),
        TokenServiceConfig::from_jwt_config(&config.auth.jwt),
    ));
    let audit = Arc::new(AuditService::new(audit_repository));
    let jobs: Arc<dyn JobQueue> = Arc::new(RedisJobQueue::new(redis.clone()));

    let auth_service = Arc::new(
        AuthService::new(accounts, token_service.clone(), config.auth.clone())
            .with_audit(audit)
            .with_jobs(jobs),
    );

    let verifier: Arc<dyn AccessTokenVerifier> = token_service;
    let app_state = web::Data::new(AppState::new(auth_service));
    let health_state = web::Data::new(HealthState::new(pool.clone(), redis));

    let bind_address = config.server.bind_address();
    info!(%bind_address, workers = config.server.workers, "binding HTTP server");

    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        create_app(app_state.clone(), health_state.clone(), verifier.clone())
    });
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    let result = server.bind(&bind_address)?.run().await;

    pool.close().await;
    result
}

/// Install the global tracing subscriber per the logging configuration.
/// An explicit RUST_LOG always wins over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(config.logging.filter_directive());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().with_ansi(config.logging.colored).init(),
        LogFormat::Compact => builder.compact().with_ansi(config.logging.colored).init(),
    }
}
