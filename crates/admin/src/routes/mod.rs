//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check (not gated)
//! GET  /static/*                      - Stylesheet (not gated)
//!
//! # Public
//! GET  /                              - Landing page
//! GET  /sign-in                       - Sign-in page
//!
//! # Admin only
//! GET  /admin                         - Order dashboard
//! GET  /admin/orders/{id}/delete      - Delete confirmation
//! POST /admin/orders/{id}/delete      - Delete an order
//!
//! # API
//! POST /api/deleteOrder               - Delete an order by id (JSON)
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod home;
pub mod orders;

use axum::{
    Router, middleware,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::middleware::{access_gate, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory holding the stylesheet served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Page and API routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/sign-in", get(auth::sign_in))
        .route("/admin", get(dashboard::dashboard))
        .route(
            "/admin/orders/{id}/delete",
            get(orders::confirm_delete).post(orders::delete),
        )
        .merge(api::router())
}

/// The complete application with the access gate and per-request middleware.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
