//! Business logic services for admin.
//!
//! # Services
//!
//! - `identity` - Session token verification against the identity provider
//! - `order_list` - In-memory order collection with load/delete
//! - `order_summary` - Count, revenue and per-day histogram
//! - `order_delete` - Store delete plus listing cache invalidation
//! - `page_cache` - Rendered page cache

pub mod identity;
pub mod order_delete;
pub mod order_list;
pub mod order_summary;
pub mod page_cache;

pub use identity::{ClerkSessionVerifier, FixedIdentityProvider, IdentityError, IdentityProvider};
pub use order_delete::{ORDER_LISTING_PATH, delete_order};
pub use order_list::{OrderBoard, OrderListController};
pub use order_summary::{DailyCount, OrderSummary, short_date, summarize};
pub use page_cache::PageCache;
