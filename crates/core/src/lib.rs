//! Orderdesk Core - Shared order types.
//!
//! This crate provides the domain types used across orderdesk components:
//! - `admin` - The order dashboard server
//! - `cli` - Command-line tools for listing and deleting orders
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Orders are
//! created by the storefront checkout and live in the hosted content store;
//! these types mirror the projection the dashboard reads.
//!
//! # Modules
//!
//! - [`types`] - Document IDs, prices, and order records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
