//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! # One line per order, newest first
//! orderdesk orders list
//!
//! # Count, revenue and orders per day
//! orderdesk orders stats
//!
//! # Delete an order (asks for confirmation unless --yes)
//! orderdesk orders delete <ID>
//! ```
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID`, `SANITY_DATASET` - Content store coordinates
//! - `SANITY_ACCESS_TOKEN` - Content store token
//! - `SANITY_API_VERSION`, `SANITY_API_URL` - Optional overrides

use std::io::{BufRead, Write};

use orderdesk_admin::config::{ConfigError, SanityConfig};
use orderdesk_admin::services::summarize;
use orderdesk_admin::store::{OrderStore, SanityClient, StoreError};
use orderdesk_core::{EmptyIdError, Order, OrderId};
use thiserror::Error;

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content store request failed.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    /// Blank order ID.
    #[error("Invalid order id: {0}")]
    InvalidId(#[from] EmptyIdError),

    /// Reading the confirmation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const CONFIRM_PROMPT: &str = "Are you sure you want to delete this order? [y/N] ";

fn connect() -> Result<SanityClient, OrdersError> {
    let config = SanityConfig::from_env()?;
    tracing::debug!(project = %config.project_id, dataset = %config.dataset, "Connecting to content store");
    Ok(SanityClient::new(&config)?)
}

/// List all orders, newest first.
///
/// # Errors
///
/// Returns an error if configuration is missing or the query fails.
pub async fn list() -> Result<(), OrdersError> {
    let orders = connect()?.list_orders().await?;

    if orders.is_empty() {
        tracing::info!("No orders");
        return Ok(());
    }

    for order in &orders {
        tracing::info!("{}", order_line(order));
    }
    tracing::info!("{} order(s)", orders.len());
    Ok(())
}

/// Print count, revenue and orders per day.
///
/// # Errors
///
/// Returns an error if configuration is missing or the query fails.
pub async fn stats() -> Result<(), OrdersError> {
    let orders = connect()?.list_orders().await?;
    let summary = summarize(&orders);

    tracing::info!("Total orders:  {}", summary.total_orders);
    tracing::info!("Total revenue: {}", summary.total_revenue.display_usd());
    for day in &summary.daily {
        tracing::info!("  {:>10}  {}", day.label(), day.orders);
    }
    Ok(())
}

/// Delete an order after confirmation.
///
/// # Errors
///
/// Returns an error if the id is blank, configuration is missing, or the
/// store rejects the delete (including unknown ids).
pub async fn delete(id: &str, yes: bool) -> Result<(), OrdersError> {
    let id = OrderId::parse(id)?;

    if !yes {
        let stdin = std::io::stdin();
        let mut stderr = std::io::stderr();
        if !confirm(&mut stdin.lock(), &mut stderr)? {
            tracing::info!("Aborted, order {} kept", id);
            return Ok(());
        }
    }

    connect()?.delete_order(&id).await?;
    tracing::info!("Deleted order {}", id);
    Ok(())
}

/// Ask for confirmation; only `y` or `yes` (any case) confirms.
fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<bool> {
    output.write_all(CONFIRM_PROMPT.as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn order_line(order: &Order) -> String {
    format!(
        "{}  {:<24}  {:<20}  {:>12}  {} item(s)",
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.id,
        order.name.as_deref().unwrap_or("-"),
        order.total_or_zero().display_usd(),
        order.cart_items.len()
    )
}
