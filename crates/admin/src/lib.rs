//! Orderdesk admin library.
//!
//! The order dashboard as a library, so that the binary, the CLI and the
//! integration tests share one implementation.
//!
//! # Security
//!
//! `/admin` is restricted to identities whose claims carry the admin flag.
//! `POST /api/deleteOrder` is not gated and must only be reachable from
//! trusted networks.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
