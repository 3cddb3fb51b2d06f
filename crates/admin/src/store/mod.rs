//! Order store access.
//!
//! Orders live in a hosted content store. The dashboard only needs two
//! operations from it: list every order, newest first, and delete one order
//! by ID. Both are behind the [`OrderStore`] trait so the HTTP client can be
//! swapped for the in-memory store in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_admin::store::{OrderStore, SanityClient};
//!
//! let store = SanityClient::new(&config.sanity)?;
//! let orders = store.list_orders().await?;
//! store.delete_order(&orders[0].id).await?;
//! ```

mod groq;
pub mod memory;
mod sanity;

pub use groq::ORDER_LISTING_QUERY;
pub use memory::InMemoryOrderStore;
pub use sanity::SanityClient;

use async_trait::async_trait;
use orderdesk_core::{Order, OrderId};
use thiserror::Error;

/// Errors that can occur when talking to the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description reported by the store.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),

    /// No document with the given ID.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Store is unavailable (used by the in-memory store's failure switch).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Queryable document store holding order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch every order, sorted by creation time descending.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Delete one order. Deleting an unknown ID is an error.
    async fn delete_order(&self, id: &OrderId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("order-123".to_string());
        assert_eq!(err.to_string(), "Order not found: order-123");

        let err = StoreError::Api {
            status: 403,
            message: "Insufficient permissions".to_string(),
        };
        assert_eq!(err.to_string(), "Store returned 403: Insufficient permissions");
    }
}
