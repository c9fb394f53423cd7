//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin for easier local testing; production
//! restricts origins to the configured allow-list.

use std::env;

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

/// Creates a CORS middleware instance configured for the current
/// environment.
///
/// # Environment Variables
/// - `ENVIRONMENT`: "production" switches to the restricted policy
/// - `ALLOWED_ORIGINS`: comma-separated origin allow-list (production)
/// - `WEB_DOMAIN`: domain whose https origins are allowed (production)
/// - `CORS_MAX_AGE`: preflight cache lifetime in seconds (default 3600)
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment == "production" {
        info!("Configuring CORS for production environment");
        apply_production_origins(base_cors(max_age))
    } else {
        info!("Configuring CORS for development environment");
        base_cors(max_age).allow_any_origin().supports_credentials()
    }
}

/// Methods, headers, and preflight settings shared by both policies.
///
/// The API serves only GET and POST routes. Accept-Language is allowed
/// so browsers can request localized error messages; Retry-After is
/// exposed so clients can read backoff hints on 503 responses.
fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(max_age)
}

fn apply_production_origins(mut cors: Cors) -> Cors {
    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(str::trim) {
            if !origin.is_empty() {
                info!(origin, "Adding allowed origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if let Ok(web_domain) = env::var("WEB_DOMAIN") {
        cors = cors.allowed_origin(&format!("https://{}", web_domain));
        cors = cors.allowed_origin(&format!("https://www.{}", web_domain));
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_development_cors() {
        env::set_var("ENVIRONMENT", "development");
        let _cors = create_cors();
        env::remove_var("ENVIRONMENT");
    }

    #[test]
    fn test_create_production_cors() {
        env::set_var("ENVIRONMENT", "production");
        env::set_var(
            "ALLOWED_ORIGINS",
            "https://app.example.com,https://admin.example.com",
        );
        env::set_var("WEB_DOMAIN", "example.com");

        let _cors = create_cors();

        env::remove_var("ENVIRONMENT");
        env::remove_var("ALLOWED_ORIGINS");
        env::remove_var("WEB_DOMAIN");
    }

    #[test]
    fn test_cors_max_age_parsing() {
        env::set_var("CORS_MAX_AGE", "7200");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");

        // Invalid max age falls back to the default
        env::set_var("CORS_MAX_AGE", "invalid");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");
    }
}
