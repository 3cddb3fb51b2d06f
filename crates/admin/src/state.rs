//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::services::{IdentityProvider, OrderListController, PageCache};
use crate::store::OrderStore;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn OrderStore>,
    identity: Arc<dyn IdentityProvider>,
    page_cache: PageCache,
    orders: OrderListController,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AdminConfig,
        store: Arc<dyn OrderStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let page_cache = PageCache::new(config.listing_cache_ttl);
        let orders = OrderListController::new(Arc::clone(&store), page_cache.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                identity,
                page_cache,
                orders,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn OrderStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    #[must_use]
    pub fn page_cache(&self) -> &PageCache {
        &self.inner.page_cache
    }

    #[must_use]
    pub fn orders(&self) -> &OrderListController {
        &self.inner.orders
    }
}
