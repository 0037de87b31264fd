// farmlink/src/models/address.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an order ships to. Older orders store one free-form line, newer clients
/// send a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeliveryAddress {
  Text(String),
  Structured(StructuredAddress),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub street: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", alias = "pincode", alias = "zip")]
  pub postal_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
}

impl fmt::Display for DeliveryAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DeliveryAddress::Text(line) => f.write_str(line.trim()),
      DeliveryAddress::Structured(addr) => {
        let parts: Vec<&str> = [&addr.street, &addr.city, &addr.state, &addr.postal_code, &addr.country]
          .into_iter()
          .filter_map(|part| part.as_deref())
          .map(str::trim)
          .filter(|part| !part.is_empty())
          .collect();
        f.write_str(&parts.join(", "))
      }
    }
  }
}
