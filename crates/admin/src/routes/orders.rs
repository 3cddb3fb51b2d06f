//! Order delete confirmation flow.
//!
//! The dashboard links each row to a confirmation page; confirming posts
//! back to the same path. Deletion is permanent.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use orderdesk_core::OrderId;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    routes::dashboard::{DELETE_FAILED, OrderRowView},
    services::ORDER_LISTING_PATH,
    state::AppState,
};

#[derive(Template)]
#[template(path = "orders/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub current_path: String,
    pub order_id: String,
    /// Order details, when the order is in the loaded list.
    pub order: Option<OrderRowView>,
}

fn parse_id(raw: &str) -> Result<OrderId, AppError> {
    OrderId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Confirmation page handler.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a blank id, or `AppError::Template`
/// if the page cannot be rendered.
#[instrument(skip(_admin, state))]
pub async fn confirm_delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let order = state
        .orders()
        .snapshot()
        .await
        .iter()
        .find(|o| o.id == id)
        .map(OrderRowView::from);

    let template = ConfirmDeleteTemplate {
        current_path: ORDER_LISTING_PATH.to_string(),
        order_id: id.to_string(),
        order,
    };
    Ok(Html(template.render()?))
}

/// Delete handler for the confirmation form.
///
/// Redirects to the dashboard either way; a failure carries a flash code
/// so the dashboard shows an alert.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a blank id.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;

    match state.orders().delete(&id).await {
        Ok(()) => {
            tracing::info!(order_id = %id, user_id = %admin.user_id, "Order deleted from dashboard");
            Ok(Redirect::to(ORDER_LISTING_PATH))
        }
        Err(_) => Ok(Redirect::to(&format!(
            "{ORDER_LISTING_PATH}?error={DELETE_FAILED}"
        ))),
    }
}
