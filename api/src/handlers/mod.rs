//! Request handling helpers shared across routes.

pub mod error_handler;

pub use error_handler::{extract_language, handle_domain_error, validation_error_response};

use actix_web::{http::header, HttpRequest};

use signet_core::domain::value_objects::RequestContext;

/// Client metadata handed to services for audit records.
pub fn client_context(req: &HttpRequest) -> RequestContext {
    let connection_info = req.connection_info();
    let ip_address = connection_info
        .realip_remote_addr()
        .map(|addr| addr.to_string());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|agent| agent.to_string());

    RequestContext::new(ip_address, user_agent)
}
