// farmlink/src/models/order_item.rs

use super::timestamp;
use crate::status::{HasStatus, ItemStatus};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an order, fulfilled by a single farmer.
///
/// `total_price` is `quantity * price_per_unit` as computed by the server; it is
/// carried as-is and not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: u64,
  #[serde(default)]
  pub order_id: Option<u64>,
  #[serde(default)]
  pub product_id: Option<u64>,
  #[serde(default)]
  pub product_name: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub farmer_id: Option<u64>,
  #[serde(default)]
  pub farmer_name: Option<String>,
  #[serde(default)]
  pub farmer_phone: Option<String>,
  pub quantity: u32,
  pub price_per_unit: Decimal,
  pub total_price: Decimal,
  pub status: ItemStatus,
  #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
  pub created_at: Option<NaiveDateTime>,
}

impl HasStatus for OrderItem {
  fn status(&self) -> &ItemStatus {
    &self.status
  }
}

impl OrderItem {
  pub fn display_name(&self) -> String {
    self
      .product_name
      .clone()
      .unwrap_or_else(|| match self.product_id {
        Some(id) => format!("Product #{}", id),
        None => format!("Item #{}", self.id),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn decimals_accept_strings_and_numbers() {
    let from_strings: OrderItem = serde_json::from_value(json!({
      "id": 1, "quantity": 3, "price_per_unit": "12.50", "total_price": "37.50", "status": "pending"
    }))
    .unwrap();
    let from_numbers: OrderItem = serde_json::from_value(json!({
      "id": 1, "quantity": 3, "price_per_unit": 12.5, "total_price": 37.5, "status": "pending"
    }))
    .unwrap();
    assert_eq!(from_strings.total_price, from_numbers.total_price);
    assert_eq!(from_strings.total_price, Decimal::new(3750, 2));
  }

  #[test]
  fn display_name_falls_back_to_ids() {
    let item: OrderItem = serde_json::from_value(json!({
      "id": 9, "product_id": 4, "quantity": 1, "price_per_unit": "1", "total_price": "1", "status": "accepted"
    }))
    .unwrap();
    assert_eq!(item.display_name(), "Product #4");
  }
}
