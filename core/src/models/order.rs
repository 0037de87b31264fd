// farmlink/src/models/order.rs

use super::address::DeliveryAddress;
use super::order_item::OrderItem;
use super::timestamp;
use crate::status::{derive_status, CompositeStatus, ItemStatus, StatusCounts};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as returned by the orders endpoints.
///
/// The server also sends an order-level `status` column. It is deliberately not read:
/// what the client shows is always derived from the items, see `composite_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  #[serde(alias = "order_id")]
  pub id: u64,
  #[serde(default)]
  pub order_number: String,
  #[serde(default)]
  pub items: Vec<OrderItem>,
  /// Missing from the farmer feed, which only lists that farmer's items.
  #[serde(default)]
  pub total_amount: Option<Decimal>,
  #[serde(default, alias = "order_date", deserialize_with = "timestamp::deserialize_opt")]
  pub created_at: Option<NaiveDateTime>,
  #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
  pub updated_at: Option<NaiveDateTime>,
  #[serde(default)]
  pub buyer_id: Option<u64>,
  #[serde(default)]
  pub buyer_name: Option<String>,
  #[serde(default)]
  pub delivery_address: Option<DeliveryAddress>,
  #[serde(default)]
  pub contact_number: Option<String>,
  #[serde(default)]
  pub payment_mode: Option<String>,
}

impl Order {
  pub fn composite_status(&self) -> CompositeStatus {
    derive_status(&self.items)
  }

  pub fn status_counts(&self) -> StatusCounts {
    StatusCounts::tally(&self.items)
  }

  /// The server total when present, otherwise the sum of the item totals.
  pub fn total(&self) -> Decimal {
    self
      .total_amount
      .unwrap_or_else(|| self.items.iter().map(|item| item.total_price).sum())
  }

  pub fn item(&self, item_id: u64) -> Option<&OrderItem> {
    self.items.iter().find(|item| item.id == item_id)
  }

  pub fn display_number(&self) -> String {
    if self.order_number.is_empty() {
      format!("#{}", self.id)
    } else {
      self.order_number.clone()
    }
  }
}

/// `{"orders": [...]}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrdersEnvelope {
  #[serde(default)]
  pub orders: Vec<Order>,
}

/// `{"order": {...}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderEnvelope {
  pub order: Order,
}

/// Body of the item status update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
  pub status: ItemStatus,
}
