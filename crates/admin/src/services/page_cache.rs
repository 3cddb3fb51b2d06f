//! Cache of rendered pages, keyed by request path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;

/// Upper bound on cached pages. The dashboard only caches a handful of paths.
const MAX_CACHED_PAGES: u64 = 64;

/// Rendered HTML keyed by path, with a time-to-live.
///
/// Every invalidation bumps a generation counter. A page rendered from data
/// read before an invalidation is never left in the cache after it.
///
/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct PageCache {
    pages: Cache<String, Arc<str>>,
    generation: Arc<AtomicU64>,
}

impl PageCache {
    /// Create a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let pages = Cache::builder()
            .max_capacity(MAX_CACHED_PAGES)
            .time_to_live(ttl)
            .build();
        Self {
            pages,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current invalidation generation. Read it before loading the data a
    /// page is rendered from and pass it to [`PageCache::insert_if_current`].
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cached rendering of `path`, if still fresh.
    pub async fn get(&self, path: &str) -> Option<Arc<str>> {
        self.pages.get(path).await
    }

    /// Store a rendering of `path`.
    pub async fn insert(&self, path: &str, html: impl Into<Arc<str>>) {
        self.pages.insert(path.to_string(), html.into()).await;
    }

    /// Store a rendering of `path` unless an invalidation happened since
    /// `generation` was read. Returns whether the page stayed cached.
    pub async fn insert_if_current(
        &self,
        path: &str,
        html: impl Into<Arc<str>>,
        generation: u64,
    ) -> bool {
        if self.generation() != generation {
            return false;
        }
        self.pages.insert(path.to_string(), html.into()).await;

        // An invalidation that raced the insert may have run before it
        if self.generation() != generation {
            self.pages.invalidate(path).await;
            return false;
        }
        true
    }

    /// Drop the cached rendering of `path` so the next request rebuilds it.
    pub async fn invalidate(&self, path: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pages.invalidate(path).await;
        tracing::debug!(path, "Page cache invalidated");
    }
}
