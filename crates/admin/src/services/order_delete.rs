//! Order deletion.

use orderdesk_core::OrderId;
use tracing::instrument;

use crate::store::{OrderStore, StoreError};

use super::PageCache;

/// Path that serves the order listing; its cached rendering goes stale
/// whenever an order is deleted.
pub const ORDER_LISTING_PATH: &str = "/admin";

/// Delete one order from the store and invalidate the listing page.
///
/// Deletion is permanent. The cache is only touched when the store
/// confirms the delete.
///
/// # Errors
///
/// Returns the store's error unchanged; it is logged here so callers only
/// need to decide what the user sees.
#[instrument(skip(store, cache), fields(order_id = %id))]
pub async fn delete_order(
    store: &dyn OrderStore,
    cache: &PageCache,
    id: &OrderId,
) -> Result<(), StoreError> {
    if let Err(e) = store.delete_order(id).await {
        tracing::error!(error = %e, "Failed to delete order");
        return Err(e);
    }

    cache.invalidate(ORDER_LISTING_PATH).await;
    tracing::info!("Order deleted");
    Ok(())
}
