//! Order list controller.
//!
//! Holds the most recently loaded orders for the dashboard. Loads replace
//! the collection wholesale; a failed load keeps whatever was there before.
//! Concurrent loads are not coordinated, so the last one to finish wins.

use std::sync::Arc;

use orderdesk_core::{Order, OrderId};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::store::{OrderStore, StoreError};

use super::order_delete::delete_order;
use super::order_summary::{OrderSummary, summarize};
use super::PageCache;

/// The in-memory order collection.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    /// Replace the whole collection.
    pub fn replace(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// Remove the order with `id`, keeping the rest in their order.
    ///
    /// Returns false if no such order was present.
    pub fn remove(&mut self, id: &OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| &o.id != id);
        self.orders.len() != before
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

/// Loads, aggregates and deletes orders for the dashboard.
pub struct OrderListController {
    store: Arc<dyn OrderStore>,
    cache: PageCache,
    board: RwLock<OrderBoard>,
}

impl OrderListController {
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, cache: PageCache) -> Self {
        Self {
            store,
            cache,
            board: RwLock::new(OrderBoard::default()),
        }
    }

    /// Fetch all orders and replace the collection.
    ///
    /// Returns false if the query failed; the error is logged and the
    /// previous collection is left untouched.
    #[instrument(skip(self))]
    pub async fn load(&self) -> bool {
        match self.store.list_orders().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Order list refreshed");
                self.board.write().await.replace(orders);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load orders, keeping previous list");
                false
            }
        }
    }

    /// Copy of the current collection, newest first.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.board.read().await.orders().to_vec()
    }

    /// Aggregates over the current collection.
    pub async fn summary(&self) -> OrderSummary {
        summarize(self.board.read().await.orders())
    }

    /// Delete an order, then drop it from the collection.
    ///
    /// # Errors
    ///
    /// Returns the store error; the collection is unchanged in that case.
    pub async fn delete(&self, id: &OrderId) -> Result<(), StoreError> {
        delete_order(self.store.as_ref(), &self.cache, id).await?;
        self.board.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::InMemoryOrderStore;
    use chrono::{TimeZone, Utc};
    use orderdesk_core::Price;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn order(id: &str, day: u32, total: Price) -> Order {
        Order {
            id: OrderId::from(id),
            name: Some(format!("Customer {id}")),
            email: None,
            phone: None,
            total_price: Some(total),
            cart_items: vec![],
            created_at: Utc.with_ymd_and_hms(2025, 4, day, 10, 0, 0).unwrap(),
        }
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    fn controller(store: Arc<InMemoryOrderStore>) -> OrderListController {
        OrderListController::new(store, PageCache::new(Duration::from_secs(60)))
    }

    #[test]
    fn test_board_remove_preserves_order() {
        let mut board = OrderBoard::default();
        board.replace(vec![
            order("c", 3, Price::ZERO),
            order("b", 2, Price::ZERO),
            order("a", 1, Price::ZERO),
        ]);

        assert!(board.remove(&OrderId::from("b")));
        assert_eq!(ids(board.orders()), vec!["c", "a"]);

        assert!(!board.remove(&OrderId::from("b")));
        assert_eq!(ids(board.orders()), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_load_then_summary() {
        let store = Arc::new(InMemoryOrderStore::new(vec![
            order("a", 1, Price::new(dec!(20.00))),
            order("b", 2, Price::new(dec!(30.00))),
        ]));
        let controller = controller(store);

        assert!(controller.load().await);

        assert_eq!(ids(&controller.snapshot().await), vec!["b", "a"]);
        let summary = controller.summary().await;
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue, Price::new(dec!(50.00)));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let store = Arc::new(InMemoryOrderStore::new(vec![order("a", 1, Price::ZERO)]));
        let controller = controller(Arc::clone(&store));
        assert!(controller.load().await);

        store.insert(order("b", 2, Price::ZERO)).await;
        store.set_fail_queries(true);

        assert!(!controller.load().await);
        assert_eq!(ids(&controller.snapshot().await), vec!["a"]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_order() {
        let store = Arc::new(InMemoryOrderStore::new(vec![
            order("a", 1, Price::ZERO),
            order("b", 2, Price::ZERO),
            order("c", 3, Price::ZERO),
        ]));
        let controller = controller(store);
        controller.load().await;

        controller.delete(&OrderId::from("b")).await.unwrap();

        assert_eq!(ids(&controller.snapshot().await), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_collection() {
        let store = Arc::new(InMemoryOrderStore::new(vec![
            order("a", 1, Price::ZERO),
            order("b", 2, Price::ZERO),
        ]));
        let controller = controller(Arc::clone(&store));
        controller.load().await;

        assert!(controller.delete(&OrderId::from("nope")).await.is_err());
        assert_eq!(ids(&controller.snapshot().await), vec!["b", "a"]);

        store.set_fail_deletes(true);
        assert!(controller.delete(&OrderId::from("a")).await.is_err());
        assert_eq!(ids(&controller.snapshot().await), vec!["b", "a"]);
    }
}
