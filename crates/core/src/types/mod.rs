//! Core types for orderdesk.

pub mod id;
pub mod order;
pub mod price;

pub use id::*;
pub use order::{AssetRef, CartItem, ImageRef, Order};
pub use price::Price;
