//! Domain models for admin.

pub mod identity;

pub use identity::{Claims, CurrentIdentity, Identity, PublicMetadata};
