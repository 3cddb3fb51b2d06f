//! Landing page.

use askama::Template;
use axum::response::Html;

use crate::middleware::MaybeIdentity;
use crate::models::Identity;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
    pub is_admin: bool,
}

/// Landing page handler.
///
/// Signed-in users without the admin flag land here after being turned
/// away from the dashboard.
pub async fn home(MaybeIdentity(identity): MaybeIdentity) -> Html<String> {
    let template = HomeTemplate {
        signed_in: identity.is_some(),
        is_admin: identity.as_ref().is_some_and(Identity::is_admin),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
