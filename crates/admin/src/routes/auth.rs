//! Sign-in page.
//!
//! Credentials are collected by the identity provider's hosted sign-in page.
//! This page only links there, with a return URL pointing at the dashboard.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;
use url::Url;

use crate::middleware::MaybeIdentity;
use crate::services::ORDER_LISTING_PATH;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "sign_in.html")]
pub struct SignInTemplate {
    /// Hosted sign-in URL, or `None` when not configured.
    pub sign_in_href: Option<String>,
}

/// Sign-in page handler.
///
/// Callers who already have a session are sent straight to the dashboard.
#[instrument(skip(identity, state))]
pub async fn sign_in(MaybeIdentity(identity): MaybeIdentity, State(state): State<AppState>) -> Response {
    if identity.is_some() {
        return Redirect::to(ORDER_LISTING_PATH).into_response();
    }

    let config = state.config();
    let sign_in_href = config
        .auth
        .sign_in_url
        .as_deref()
        .and_then(|url| hosted_sign_in_href(url, &config.base_url));

    let template = SignInTemplate { sign_in_href };
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Hosted sign-in URL with `redirect_url` pointing at the dashboard.
fn hosted_sign_in_href(sign_in_url: &str, base_url: &str) -> Option<String> {
    let mut url = Url::parse(sign_in_url)
        .inspect_err(|e| tracing::warn!(error = %e, "Invalid sign-in URL"))
        .ok()?;
    let return_to = format!("{}{ORDER_LISTING_PATH}", base_url.trim_end_matches('/'));
    url.query_pairs_mut().append_pair("redirect_url", &return_to);
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_sign_in_href() {
        assert_eq!(
            hosted_sign_in_href("https://accounts.example.test/sign-in", "https://admin.example.test/")
                .as_deref(),
            Some(
                "https://accounts.example.test/sign-in?redirect_url=https%3A%2F%2Fadmin.example.test%2Fadmin"
            )
        );
        assert_eq!(hosted_sign_in_href("not a url", "https://admin.example.test"), None);
    }
}
