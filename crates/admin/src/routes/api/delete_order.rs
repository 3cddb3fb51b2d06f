//! `POST /api/deleteOrder`.
//!
//! Deletes one order by id. The handler performs no authorization of its
//! own: `/api` paths are outside the admin-only area, so any caller that
//! can reach the service can delete any order. Deploy it behind the same
//! network boundary as the dashboard.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use orderdesk_core::OrderId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Build the delete router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/deleteOrder", post(delete_order))
}

/// Request body.
#[derive(Debug, Deserialize)]
pub struct DeleteOrderRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Success body, always `{"success": true}`.
#[derive(Debug, Serialize)]
pub struct DeleteOrderResponse {
    pub success: bool,
}

/// Failure body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

fn error(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Delete an order.
///
/// Responds 200 `{"success":true}`, 400 when the id is missing, or 500
/// when the store rejects the delete. Store errors are logged, not returned.
#[instrument(skip(state, body))]
pub async fn delete_order(
    State(state): State<AppState>,
    body: Result<Json<DeleteOrderRequest>, JsonRejection>,
) -> Response {
    let id = match body {
        Ok(Json(request)) => request.id.as_deref().map(OrderId::parse),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected delete request body");
            None
        }
    };
    let Some(Ok(id)) = id else {
        return error(StatusCode::BAD_REQUEST, "Missing order id");
    };

    match state.orders().delete(&id).await {
        Ok(()) => Json(DeleteOrderResponse { success: true }).into_response(),
        Err(_) => error(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed"),
    }
}
