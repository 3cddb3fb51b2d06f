//! Identity extractors for route handlers.
//!
//! Both read the [`CurrentIdentity`] that the access gate stored in the
//! request extensions.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::access::AccessDecision;
use crate::models::{CurrentIdentity, Identity};

/// Extractor that requires a signed-in admin.
///
/// Applies the same redirects as the access policy: anonymous callers go
/// to the sign-in page, non-admins to the home page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.user_id)
/// }
/// ```
pub struct RequireAdmin(pub Identity);

/// Rejection for [`RequireAdmin`].
pub struct AdminRejection(AccessDecision);

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        Redirect::temporary(self.0.location().unwrap_or("/")).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<CurrentIdentity>()
            .and_then(|current| current.0.clone())
            .ok_or(AdminRejection(AccessDecision::RedirectToSignIn))?;

        if !identity.is_admin() {
            return Err(AdminRejection(AccessDecision::RedirectToHome));
        }

        Ok(Self(identity))
    }
}

/// Extractor that optionally gets the current identity.
///
/// Unlike `RequireAdmin`, this never rejects.
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<CurrentIdentity>()
                .and_then(|current| current.0.clone()),
        ))
    }
}
