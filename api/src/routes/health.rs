//! Health check endpoint.

use actix_web::{web, HttpResponse};
use tracing::warn;

use crate::state::HealthState;

/// Handler for GET /health
///
/// Reports service liveness plus the state of each backing store. Returns
/// 200 when everything reachable is healthy, 503 when a configured store
/// fails its check. Stores not wired up (test configurations) report as
/// "skipped" and do not degrade the result.
pub async fn health_check(state: web::Data<HealthState>) -> HttpResponse {
    let database = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "database health check failed");
                "failed"
            }
        },
        None => "skipped",
    };

    let cache = match &state.cache {
        Some(client) => match client.health_check().await {
            Ok(true) => "ok",
            Ok(false) => "failed",
            Err(e) => {
                warn!(error = %e, "cache health check failed");
                "failed"
            }
        },
        None => "skipped",
    };

    let degraded = database == "failed" || cache == "failed";
    let body = serde_json::json!({
        "status": if degraded { "degraded" } else { "healthy" },
        "service": "signet-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "database": database,
            "cache": cache,
        },
    });

    if degraded {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
