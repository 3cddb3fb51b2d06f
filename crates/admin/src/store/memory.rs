//! In-memory order store for tests and local development.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use orderdesk_core::{Order, OrderId};
use tokio::sync::RwLock;

use super::{OrderStore, StoreError};

/// Order store backed by a `Vec`, with switches to simulate outages.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    fail_queries: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryOrderStore {
    /// Create a store holding the given orders.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
            ..Self::default()
        }
    }

    /// Make subsequent `list_orders` calls fail (or succeed again).
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete_order` calls fail (or succeed again).
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Add an order, as the checkout would.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.push(order);
    }

    /// IDs currently stored, in insertion order.
    pub async fn ids(&self) -> Vec<OrderId> {
        self.orders.read().await.iter().map(|o| o.id.clone()).collect()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("query failure injected".to_string()));
        }

        let mut orders = self.orders.read().await.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("delete failure injected".to_string()));
        }

        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| &o.id != id);
        if orders.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
