// admin_console/src/cli.rs

use clap::{Parser, Subcommand};
use farmlink::{ItemStatus, OrderTab};

/// Admin console for the Farmlink marketplace API.
///
/// Reads API_URL (or NEXT_PUBLIC_API_URL) and ADMIN_TOKEN from the environment or a
/// .env file.
#[derive(Debug, Parser)]
#[command(name = "farmlink-admin", version, about)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Inspect orders and change their status.
  #[command(subcommand)]
  Orders(OrdersCommand),
  /// Change a single order item.
  #[command(subcommand)]
  Items(ItemsCommand),
  /// Tab counts and completed revenue over all orders.
  Summary,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
  /// List orders with their derived status.
  List {
    #[arg(long, default_value_t = OrderTab::All)]
    tab: OrderTab,
  },
  /// Show one order and its items.
  Show { order_id: u64 },
  /// Move every item of an order to STATUS, then reload the order list.
  SetStatus {
    order_id: u64,
    #[arg(value_parser = parse_settable_status)]
    status: ItemStatus,
  },
}

#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
  /// Set the status of one order item.
  SetStatus {
    item_id: u64,
    #[arg(value_parser = parse_settable_status)]
    status: ItemStatus,
  },
}

fn parse_settable_status(raw: &str) -> Result<ItemStatus, String> {
  let status: ItemStatus = raw.parse().map_err(|_| format!("invalid status '{}'", raw))?;
  if status.is_recognized() {
    Ok(status)
  } else {
    Err(format!(
      "unknown status '{}' (expected pending, accepted, completed or rejected)",
      raw
    ))
  }
}
