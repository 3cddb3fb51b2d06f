//! API route handlers for admin.
//!
//! JSON endpoints called from scripts and the storefront tooling.

pub mod delete_order;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(delete_order::router())
}
