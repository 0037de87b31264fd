// admin_console/src/render.rs

//! Plain-text tables for the terminal.

use chrono::NaiveDateTime;
use farmlink::{BatchUpdate, Order, OrderSummary, OrderTab};
use rust_decimal::Decimal;
use std::fmt::Write;

pub fn money(amount: Decimal) -> String {
  format!("₹{:.2}", amount.round_dp(2))
}

fn date(at: Option<NaiveDateTime>) -> String {
  at.map(|at| at.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|| "-".to_string())
}

pub fn orders_table(orders: &[&Order]) -> String {
  if orders.is_empty() {
    return "No orders found.\n".to_string();
  }

  let mut out = String::new();
  // Writing to a String cannot fail.
  let _ = writeln!(
    out,
    "{:<14} {:<18} {:<16} {:>12}  {}",
    "ORDER", "BUYER", "DATE", "TOTAL", "STATUS"
  );
  for order in orders {
    let _ = writeln!(
      out,
      "{:<14} {:<18} {:<16} {:>12}  {}",
      order.display_number(),
      order.buyer_name.as_deref().unwrap_or("-"),
      date(order.created_at),
      money(order.total()),
      order.composite_status().label()
    );
  }
  out
}

pub fn order_detail(order: &Order) -> String {
  let status = order.composite_status();
  let mut out = String::new();
  let _ = writeln!(out, "Order {} (id {})", order.display_number(), order.id);
  let _ = writeln!(out, "  Status:   {}", status.label());
  let _ = writeln!(out, "  Buyer:    {}", order.buyer_name.as_deref().unwrap_or("-"));
  if let Some(address) = &order.delivery_address {
    let _ = writeln!(out, "  Deliver:  {}", address);
  }
  if let Some(contact) = &order.contact_number {
    let _ = writeln!(out, "  Contact:  {}", contact);
  }
  let _ = writeln!(out, "  Placed:   {}", date(order.created_at));
  let _ = writeln!(out, "  Total:    {}", money(order.total()));
  let _ = writeln!(out, "  Items:");
  for item in &order.items {
    let _ = writeln!(
      out,
      "    [{}] {} x{} @ {} = {}  {}  ({})",
      item.id,
      item.display_name(),
      item.quantity,
      money(item.price_per_unit),
      money(item.total_price),
      item.status,
      item.farmer_name.as_deref().unwrap_or("unknown farmer")
    );
  }

  let targets: Vec<String> = status.bulk_targets().iter().map(|t| t.to_string()).collect();
  let _ = writeln!(out, "  Change status to: {}", targets.join(", "));
  out
}

pub fn batch_report(batch: &BatchUpdate) -> String {
  let mut out = String::new();
  let total = batch.outcomes.len();
  if batch.is_complete() {
    let _ = writeln!(
      out,
      "Order {}: {} item(s) set to {}.",
      batch.order_id, total, batch.target
    );
    return out;
  }

  let _ = writeln!(
    out,
    "Order {}: {} of {} item(s) set to {}.",
    batch.order_id,
    total - batch.failure_count(),
    total,
    batch.target
  );
  for (item_id, error) in batch.failures() {
    let _ = writeln!(out, "  item {} failed: {}", item_id, error);
  }
  out
}

pub fn summary(summary: &OrderSummary) -> String {
  let mut out = String::new();
  for tab in OrderTab::ALL {
    let _ = writeln!(out, "{:<10} {:>6}", tab.to_string(), summary.tabs.get(tab));
  }
  let _ = writeln!(out, "{:<10} {:>6}", "items", summary.item_count);
  let _ = writeln!(out, "Completed revenue: {}", money(summary.completed_revenue));
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use farmlink::{ClientError, ItemStatus, ItemUpdateOutcome};
  use serde_json::json;

  fn order() -> Order {
    serde_json::from_value(json!({
      "id": 5,
      "order_number": "ORD-0005",
      "buyer_name": "Asha",
      "total_amount": "45.5",
      "created_at": "2024-05-01T10:20:30",
      "delivery_address": {"street": "12 Mill Road", "city": "Nashik"},
      "items": [
        {"id": 51, "product_name": "Tomatoes", "quantity": 2, "price_per_unit": "10",
         "total_price": "20", "status": "accepted", "farmer_name": "Ravi"},
        {"id": 52, "product_name": "Onions", "quantity": 3, "price_per_unit": "8.5",
         "total_price": "25.5", "status": "completed"}
      ]
    }))
    .unwrap()
  }

  #[test]
  fn table_lists_derived_label() {
    let order = order();
    let table = orders_table(&[&order]);
    assert!(table.contains("ORD-0005"));
    assert!(table.contains("Asha"));
    assert!(table.contains("₹45.50"));
    assert!(table.contains("Mixed (In Progress)"));
    assert_eq!(orders_table(&[]), "No orders found.\n");
  }

  #[test]
  fn detail_lists_items_and_bulk_targets() {
    let detail = order_detail(&order());
    assert!(detail.contains("Deliver:  12 Mill Road, Nashik"));
    assert!(detail.contains("[51] Tomatoes x2 @ ₹10.00 = ₹20.00  accepted  (Ravi)"));
    assert!(detail.contains("(unknown farmer)"));
    assert!(detail.contains("Change status to: pending, completed, rejected"));
  }

  #[test]
  fn batch_report_lists_failures() {
    let batch = BatchUpdate {
      order_id: 5,
      target: ItemStatus::Completed,
      outcomes: vec![
        ItemUpdateOutcome {
          item_id: 51,
          result: Ok(()),
        },
        ItemUpdateOutcome {
          item_id: 52,
          result: Err(ClientError::Server {
            status: 403,
            message: "Forbidden".to_string(),
            payload: json!({"message": "Forbidden"}),
          }),
        },
      ],
    };
    let report = batch_report(&batch);
    assert!(report.starts_with("Order 5: 1 of 2 item(s) set to completed."));
    assert!(report.contains("item 52 failed: Server responded 403: Forbidden"));
  }

  #[test]
  fn summary_prints_every_tab() {
    let summary_text = summary(&OrderSummary::from_orders(&[order()]));
    assert!(summary_text.contains("all"));
    assert!(summary_text.contains("accepted"));
    assert!(summary_text.contains("Completed revenue: ₹0.00"));
  }
}
