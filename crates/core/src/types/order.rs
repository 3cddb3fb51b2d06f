//! Order records as projected from the content store.
//!
//! Field names follow the store's document shape (`_id`, `totalPrice`,
//! `cartItems`, `_createdAt`). Orders are written by the storefront checkout;
//! this system only reads and deletes them.
//!
//! The stored `total_price` is independent of the cart items. Nothing here
//! recomputes it from item prices and quantities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use super::{OrderId, Price};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Stable document ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Customer phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Order total as recorded at checkout.
    #[serde(default)]
    pub total_price: Option<Price>,
    /// Line items, in checkout order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cart_items: Vec<CartItem>,
    /// Document creation time.
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The recorded total, with a missing total counted as zero.
    #[must_use]
    pub fn total_or_zero(&self) -> Price {
        self.total_price.unwrap_or(Price::ZERO)
    }
}

/// A single line in an order's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Key unique within the parent order. Older checkouts did not set one.
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Units ordered. Fractional values are truncated.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<u32>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Reference to an image asset held by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

/// Pointer to an asset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// The store projects a missing array as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Quantities are sometimes stored as floats (`2.0`) or strings.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.and_then(|q| q.trunc().to_u32()))
}
