//! Translation of domain errors to HTTP responses.
//!
//! Every handler funnels failures through [`handle_domain_error`], so
//! status codes and message wording stay uniform across the API. Token
//! failures deliberately collapse to one generic 401: clients never
//! learn whether a token was expired, revoked, or malformed.

use std::collections::HashMap;

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{debug, error, warn};

use signet_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use signet_shared::errors::ErrorResponse;

use crate::i18n::{format_message, get_error_message, Language};

/// Language preference from the `Accept-Language` header
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Convert a domain error to a localized HTTP response.
pub fn handle_domain_error(error: &DomainError, req: &HttpRequest) -> HttpResponse {
    let lang = extract_language(req);

    let (code, message, status) = match error {
        DomainError::Auth(auth_error) => map_auth_error(auth_error, lang),
        DomainError::Token(token_error) => map_token_error(token_error, lang),
        DomainError::Validation(validation_error) => map_validation_error(validation_error, lang),
        DomainError::NotFound { resource } => {
            let mut params = HashMap::new();
            params.insert("resource", resource.clone());
            lookup("general", "not_found", lang, &params)
        }
        DomainError::Conflict { resource } => {
            let mut params = HashMap::new();
            params.insert("resource", resource.clone());
            lookup("general", "conflict", lang, &params)
        }
        DomainError::Internal { message } => {
            error!(%message, "internal error");
            lookup("general", "internal_error", lang, &HashMap::new())
        }
        DomainError::Unavailable { message } => {
            warn!(%message, "dependency unavailable");
            lookup("general", "service_unavailable", lang, &HashMap::new())
        }
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if !status.is_server_error() {
        debug!(code = %code, status = %status, path = req.path(), "request rejected");
    }

    let mut builder = HttpResponse::build(status);
    if error.is_retriable() {
        builder.insert_header((header::RETRY_AFTER, "1"));
    }
    builder.json(ErrorResponse::new(code, message))
}

/// Convert DTO validation failures to a 400 in the standard error shape.
///
/// Only the first failing field is reported; its name rides along in the
/// `details` map so clients can highlight it.
pub fn validation_error_response(
    errors: &validator::ValidationErrors,
    req: &HttpRequest,
) -> HttpResponse {
    let (field, message) = errors
        .field_errors()
        .into_iter()
        .next()
        .map(|(field, field_errors)| {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid value".to_string());
            (field.to_string(), message)
        })
        .unwrap_or_else(|| ("request".to_string(), "invalid value".to_string()));

    let lang = extract_language(req);
    let mut params = HashMap::new();
    params.insert("field", field.clone());
    params.insert("message", message);
    let (code, text, status) = lookup("validation", "invalid_field", lang, &params);

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
    HttpResponse::build(status).json(ErrorResponse::new(code, text).add_detail("field", field))
}

fn map_auth_error(error: &AuthError, lang: Language) -> (String, String, u16) {
    let key = match error {
        AuthError::InvalidCredentials => "invalid_credentials",
        AuthError::AuthenticationFailed => "authentication_failed",
        AuthError::AccountLocked => "account_locked",
        AuthError::AccountAlreadyExists => "account_exists",
        AuthError::InsufficientPermissions => "insufficient_permissions",
        AuthError::RegistrationDisabled => "registration_disabled",
    };
    lookup("auth", key, lang, &HashMap::new())
}

fn map_token_error(_error: &TokenError, lang: Language) -> (String, String, u16) {
    // One response for every token failure; the specific cause stays in
    // the audit trail.
    lookup("token", "invalid_token", lang, &HashMap::new())
}

fn map_validation_error(error: &ValidationError, lang: Language) -> (String, String, u16) {
    match error {
        ValidationError::InvalidEmail => {
            lookup("validation", "invalid_email", lang, &HashMap::new())
        }
        ValidationError::WeakPassword { reason } => {
            let mut params = HashMap::new();
            params.insert("reason", reason.clone());
            lookup("validation", "weak_password", lang, &params)
        }
        ValidationError::InvalidField { field, message } => {
            let mut params = HashMap::new();
            params.insert("field", field.clone());
            params.insert("message", message.clone());
            lookup("validation", "invalid_field", lang, &params)
        }
    }
}

fn lookup(
    category: &str,
    key: &str,
    lang: Language,
    params: &HashMap<&str, String>,
) -> (String, String, u16) {
    get_error_message(category, key, lang)
        .map(|(code, template, status)| (code, format_message(&template, params), status))
        .unwrap_or_else(|| {
            error!(category, key, "missing error message catalog entry");
            (
                "INTERNAL_ERROR".to_string(),
                "An internal error occurred".to_string(),
                500,
            )
        })
}
