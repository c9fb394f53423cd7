//! HTTPS enforcement and security response headers.
//!
//! In production every plain-HTTP request is rejected unless a trusted
//! proxy forwarded it as https, malformed Origin headers are refused,
//! and standard security headers are stamped on each response. Both
//! behaviors are off in development so local tooling works.

use std::{
    env,
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorBadRequest, ErrorForbidden},
    http::header::{HeaderName, HeaderValue, ORIGIN},
    Error,
};
use futures_util::future::LocalBoxFuture;
use tracing::{info, warn};

/// Headers stamped on every response when stamping is enabled
const RESPONSE_HEADERS: &[(&str, &str)] = &[
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none';",
    ),
];

/// Per-request decisions, shared between the factory and the service
#[derive(Clone)]
struct SecurityPolicy {
    require_https: bool,
    stamp_headers: bool,
    trusted_proxies: Vec<String>,
}

impl SecurityPolicy {
    /// A request counts as secure when its own scheme is https, when a
    /// trusted proxy says it was https at the edge, or when it targets
    /// localhost.
    fn request_is_secure(&self, req: &ServiceRequest) -> bool {
        let conn_info = req.connection_info();
        if conn_info.scheme() == "https" {
            return true;
        }

        if let Some(forwarded) = req.headers().get("x-forwarded-proto") {
            if forwarded.to_str().map(|p| p == "https").unwrap_or(false)
                && self.proxy_is_trusted(conn_info.peer_addr().unwrap_or(""))
            {
                return true;
            }
        }

        let host = conn_info.host();
        host == "localhost" || host.starts_with("127.0.0.1") || host.starts_with("[::1]")
    }

    fn proxy_is_trusted(&self, peer_addr: &str) -> bool {
        // peer address may carry a port
        let ip = peer_addr.split(':').next().unwrap_or(peer_addr);
        self.trusted_proxies
            .iter()
            .any(|trusted| trusted == ip || trusted == peer_addr)
    }
}

/// Middleware factory enforcing the transport security policy
pub struct SecurityMiddleware {
    policy: SecurityPolicy,
}

impl SecurityMiddleware {
    /// Build the policy from the environment: enforcement is on only in
    /// production, and `TRUSTED_PROXIES` lists peers whose
    /// `X-Forwarded-Proto` is believed.
    pub fn new() -> Self {
        let production =
            env::var("ENVIRONMENT").map(|e| e == "production").unwrap_or(false);
        let trusted_proxies: Vec<String> = env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        info!(
            enforce_https = production,
            ?trusted_proxies,
            "Security middleware configured"
        );

        Self {
            policy: SecurityPolicy {
                require_https: production,
                stamp_headers: production,
                trusted_proxies,
            },
        }
    }
}

impl Default for SecurityMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            policy: self.policy.clone(),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    policy: SecurityPolicy,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = self.policy.clone();

        Box::pin(async move {
            if policy.require_https && !policy.request_is_secure(&req) {
                warn!(
                    method = %req.method(),
                    path = req.path(),
                    "Insecure request blocked"
                );
                return Err(ErrorForbidden("HTTPS required"));
            }

            if let Some(origin) = req.headers().get(ORIGIN) {
                if !origin_is_well_formed(origin) {
                    warn!(
                        ?origin,
                        method = %req.method(),
                        path = req.path(),
                        "Invalid origin blocked"
                    );
                    return Err(ErrorBadRequest("Invalid request origin"));
                }
            }

            let mut response = service.call(req).await?;

            if policy.stamp_headers {
                let headers = response.headers_mut();
                for (name, value) in RESPONSE_HEADERS {
                    headers.insert(
                        HeaderName::from_static(name),
                        HeaderValue::from_static(value),
                    );
                }
            }

            Ok(response)
        })
    }
}

/// Origin validation proper is the CORS layer's job; this only refuses
/// values that are not web origins at all.
fn origin_is_well_formed(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|s| s.starts_with("http://") || s.starts_with("https://"))
        .unwrap_or(false)
}
