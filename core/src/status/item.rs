// farmlink/src/status/item.rs

//! The per-line-item status as the server reports it.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Status of a single order item.
///
/// The server only ever writes the four base values, but newer API versions may
/// introduce more. Anything unknown is kept verbatim in `Other` so it survives a
/// round trip and can be shown, while the aggregator leaves it out of every bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
  Pending,
  Accepted,
  Completed,
  Rejected,
  Other(String),
}

impl ItemStatus {
  /// The four statuses an admin can set through the item status endpoint.
  pub const SETTABLE: [ItemStatus; 4] = [
    ItemStatus::Pending,
    ItemStatus::Accepted,
    ItemStatus::Completed,
    ItemStatus::Rejected,
  ];

  pub fn as_str(&self) -> &str {
    match self {
      ItemStatus::Pending => "pending",
      ItemStatus::Accepted => "accepted",
      ItemStatus::Completed => "completed",
      ItemStatus::Rejected => "rejected",
      ItemStatus::Other(raw) => raw.as_str(),
    }
  }

  /// `false` only for `Other`.
  pub fn is_recognized(&self) -> bool {
    !matches!(self, ItemStatus::Other(_))
  }
}

impl FromStr for ItemStatus {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s {
      "pending" => ItemStatus::Pending,
      "accepted" => ItemStatus::Accepted,
      "completed" => ItemStatus::Completed,
      "rejected" => ItemStatus::Rejected,
      other => ItemStatus::Other(other.to_string()),
    })
  }
}

impl From<String> for ItemStatus {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "pending" => ItemStatus::Pending,
      "accepted" => ItemStatus::Accepted,
      "completed" => ItemStatus::Completed,
      "rejected" => ItemStatus::Rejected,
      _ => ItemStatus::Other(raw),
    }
  }
}

impl From<ItemStatus> for String {
  fn from(status: ItemStatus) -> Self {
    match status {
      ItemStatus::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for ItemStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
