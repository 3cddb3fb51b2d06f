//! Orderdesk CLI - order management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List orders
//! orderdesk orders list
//!
//! # Order count, revenue and daily histogram
//! orderdesk orders stats
//!
//! # Delete an order without the confirmation prompt
//! orderdesk orders delete order-123 --yes
//! ```
//!
//! # Commands
//!
//! - `orders list` - List orders, newest first
//! - `orders stats` - Aggregates shown on the dashboard
//! - `orders delete` - Permanently delete an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(author, version, about = "Orderdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all orders, newest first
    List,
    /// Show order count, revenue and orders per day
    Stats,
    /// Permanently delete an order
    Delete {
        /// Order document ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list().await?,
            OrdersAction::Stats => commands::orders::stats().await?,
            OrdersAction::Delete { id, yes } => commands::orders::delete(&id, yes).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["orderdesk", "orders", "delete", "order-1", "--yes"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Orders {
                action: OrdersAction::Delete { ref id, yes: true }
            }) if id == "order-1"
        ));
    }
}
