//! Access gate middleware.
//!
//! Runs the route access policy on every gated request. The caller's
//! identity is resolved once here and handed to handlers through
//! [`CurrentIdentity`] in the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::access::{evaluate, is_gated};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::CurrentIdentity;
use crate::state::AppState;

/// Evaluate the access policy and redirect or continue.
///
/// If the identity provider fails, the caller is treated as anonymous.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !is_gated(&path) {
        return next.run(request).await;
    }

    let identity = match state.identity().identify(request.headers()) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, path = %path, "Identity check failed, treating caller as anonymous");
            None
        }
    };

    match &identity {
        Some(identity) => set_sentry_user(&identity.user_id),
        None => clear_sentry_user(),
    }

    let decision = evaluate(&path, identity.as_ref());
    if let Some(location) = decision.location() {
        tracing::debug!(path = %path, ?decision, location, "Access denied, redirecting");
        return Redirect::temporary(location).into_response();
    }

    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}
