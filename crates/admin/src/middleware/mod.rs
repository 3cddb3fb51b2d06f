//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, error capture)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//! 5. Access gate (route access policy, resolves the caller's identity)

pub mod access;
pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use access::access_gate;
pub use auth::{MaybeIdentity, RequireAdmin};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
