// farmlink/src/status/tab.rs

//! List-view buckets that group orders by their composite status.

use super::composite::CompositeStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderTab {
  #[default]
  All,
  Pending,
  Accepted,
  Completed,
  Rejected,
}

impl OrderTab {
  pub const ALL: [OrderTab; 5] = [
    OrderTab::All,
    OrderTab::Pending,
    OrderTab::Accepted,
    OrderTab::Completed,
    OrderTab::Rejected,
  ];

  /// The pending and accepted tabs also collect their mixed counterparts. A plain
  /// `Mixed` order is only listed under `All`.
  pub fn matches(self, status: CompositeStatus) -> bool {
    match self {
      OrderTab::All => true,
      OrderTab::Pending => matches!(status, CompositeStatus::Pending | CompositeStatus::MixedPending),
      OrderTab::Accepted => matches!(status, CompositeStatus::Accepted | CompositeStatus::MixedAccepted),
      OrderTab::Completed => status == CompositeStatus::Completed,
      OrderTab::Rejected => status == CompositeStatus::Rejected,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      OrderTab::All => "all",
      OrderTab::Pending => "pending",
      OrderTab::Accepted => "accepted",
      OrderTab::Completed => "completed",
      OrderTab::Rejected => "rejected",
    }
  }
}

impl fmt::Display for OrderTab {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order tab '{0}' (expected all, pending, accepted, completed or rejected)")]
pub struct UnknownTab(pub String);

impl FromStr for OrderTab {
  type Err = UnknownTab;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderTab::ALL
      .into_iter()
      .find(|tab| tab.as_str() == s)
      .ok_or_else(|| UnknownTab(s.to_string()))
  }
}

/// How many orders each tab would list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
  pub all: usize,
  pub pending: usize,
  pub accepted: usize,
  pub completed: usize,
  pub rejected: usize,
}

impl TabCounts {
  pub fn from_statuses<I>(statuses: I) -> Self
  where
    I: IntoIterator<Item = CompositeStatus>,
  {
    let mut counts = TabCounts::default();
    for status in statuses {
      for tab in OrderTab::ALL {
        if tab.matches(status) {
          *counts.slot_mut(tab) += 1;
        }
      }
    }
    counts
  }

  pub fn get(&self, tab: OrderTab) -> usize {
    match tab {
      OrderTab::All => self.all,
      OrderTab::Pending => self.pending,
      OrderTab::Accepted => self.accepted,
      OrderTab::Completed => self.completed,
      OrderTab::Rejected => self.rejected,
    }
  }

  fn slot_mut(&mut self, tab: OrderTab) -> &mut usize {
    match tab {
      OrderTab::All => &mut self.all,
      OrderTab::Pending => &mut self.pending,
      OrderTab::Accepted => &mut self.accepted,
      OrderTab::Completed => &mut self.completed,
      OrderTab::Rejected => &mut self.rejected,
    }
  }
}
