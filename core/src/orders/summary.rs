// farmlink/src/orders/summary.rs

use crate::models::Order;
use crate::status::{CompositeStatus, OrderTab, TabCounts};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Orders of `orders` that `tab` lists, in their original order.
pub fn orders_in_tab(orders: &[Order], tab: OrderTab) -> Vec<&Order> {
  orders
    .iter()
    .filter(|order| tab.matches(order.composite_status()))
    .collect()
}

/// Dashboard figures for one fetched order list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
  pub tabs: TabCounts,
  pub by_status: BTreeMap<CompositeStatus, usize>,
  /// Sum of `Order::total` over fully completed orders.
  pub completed_revenue: Decimal,
  pub item_count: usize,
}

impl OrderSummary {
  pub fn from_orders(orders: &[Order]) -> Self {
    let mut summary = OrderSummary::default();
    let mut statuses = Vec::with_capacity(orders.len());

    for order in orders {
      let status = order.composite_status();
      statuses.push(status);
      *summary.by_status.entry(status).or_insert(0) += 1;
      summary.item_count += order.items.len();
      if status == CompositeStatus::Completed {
        summary.completed_revenue += order.total();
      }
    }

    summary.tabs = TabCounts::from_statuses(statuses);
    summary
  }

  pub fn count(&self, status: CompositeStatus) -> usize {
    self.by_status.get(&status).copied().unwrap_or(0)
  }
}
