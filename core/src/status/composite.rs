// farmlink/src/status/composite.rs

//! Derivation of the single status shown for an order from the statuses of its items.
//!
//! The composite is never stored. It is recomputed from the items on every fetch,
//! so the client can never drift from what the server holds per item.

use super::item::ItemStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that carries an item status. Lets `derive_status` take plain statuses,
/// order items, or references to either.
pub trait HasStatus {
  fn status(&self) -> &ItemStatus;
}

impl HasStatus for ItemStatus {
  fn status(&self) -> &ItemStatus {
    self
  }
}

impl<T: HasStatus + ?Sized> HasStatus for &T {
  fn status(&self) -> &ItemStatus {
    (**self).status()
  }
}

/// The representative status of a whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeStatus {
  Pending,
  Accepted,
  Completed,
  Rejected,
  /// At least one item is still pending.
  MixedPending,
  /// Nothing pending, at least one item accepted but not finished.
  MixedAccepted,
  /// Only completed and rejected items remain.
  Mixed,
}

impl CompositeStatus {
  pub const ALL: [CompositeStatus; 7] = [
    CompositeStatus::Pending,
    CompositeStatus::Accepted,
    CompositeStatus::Completed,
    CompositeStatus::Rejected,
    CompositeStatus::MixedPending,
    CompositeStatus::MixedAccepted,
    CompositeStatus::Mixed,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      CompositeStatus::Pending => "pending",
      CompositeStatus::Accepted => "accepted",
      CompositeStatus::Completed => "completed",
      CompositeStatus::Rejected => "rejected",
      CompositeStatus::MixedPending => "mixed-pending",
      CompositeStatus::MixedAccepted => "mixed-accepted",
      CompositeStatus::Mixed => "mixed",
    }
  }

  /// Display label used by the admin views.
  pub fn label(self) -> &'static str {
    match self {
      CompositeStatus::Pending => "Pending",
      CompositeStatus::Accepted => "Accepted",
      CompositeStatus::Completed => "Completed",
      CompositeStatus::Rejected => "Rejected",
      CompositeStatus::MixedPending => "Mixed (Pending)",
      CompositeStatus::MixedAccepted => "Mixed (In Progress)",
      CompositeStatus::Mixed => "Mixed",
    }
  }

  pub fn is_mixed(self) -> bool {
    matches!(
      self,
      CompositeStatus::MixedPending | CompositeStatus::MixedAccepted | CompositeStatus::Mixed
    )
  }

  /// No item of the order is waiting on anyone.
  pub fn is_terminal(self) -> bool {
    matches!(
      self,
      CompositeStatus::Completed | CompositeStatus::Rejected | CompositeStatus::Mixed
    )
  }

  /// Whether the order-level "change status" action offers `target`.
  ///
  /// A target is hidden when the order already sits in it, and for pending and
  /// accepted also when the order is the matching mixed state.
  pub fn offers_bulk_target(self, target: &ItemStatus) -> bool {
    match target {
      ItemStatus::Pending => !matches!(self, CompositeStatus::Pending | CompositeStatus::MixedPending),
      ItemStatus::Accepted => !matches!(self, CompositeStatus::Accepted | CompositeStatus::MixedAccepted),
      ItemStatus::Completed => self != CompositeStatus::Completed,
      ItemStatus::Rejected => self != CompositeStatus::Rejected,
      ItemStatus::Other(_) => false,
    }
  }

  pub fn bulk_targets(self) -> Vec<ItemStatus> {
    ItemStatus::SETTABLE
      .into_iter()
      .filter(|target| self.offers_bulk_target(target))
      .collect()
  }
}

impl fmt::Display for CompositeStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Per-bucket tally of one pass over an order's items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
  pub pending: usize,
  pub accepted: usize,
  pub completed: usize,
  pub rejected: usize,
  /// Values outside the four base statuses. They count toward `total` only.
  pub unrecognized: usize,
  pub total: usize,
}

impl StatusCounts {
  pub fn tally<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: HasStatus,
  {
    let mut counts = StatusCounts::default();
    for item in items {
      match item.status() {
        ItemStatus::Pending => counts.pending += 1,
        ItemStatus::Accepted => counts.accepted += 1,
        ItemStatus::Completed => counts.completed += 1,
        ItemStatus::Rejected => counts.rejected += 1,
        ItemStatus::Other(_) => counts.unrecognized += 1,
      }
      counts.total += 1;
    }
    counts
  }

  /// Applies the uniform check and then the pending > accepted > mixed priority.
  pub fn composite(&self) -> CompositeStatus {
    if self.total == 0 || self.pending == self.total {
      return CompositeStatus::Pending;
    }
    if self.accepted == self.total {
      return CompositeStatus::Accepted;
    }
    if self.completed == self.total {
      return CompositeStatus::Completed;
    }
    if self.rejected == self.total {
      return CompositeStatus::Rejected;
    }

    if self.pending > 0 {
      CompositeStatus::MixedPending
    } else if self.accepted > 0 {
      CompositeStatus::MixedAccepted
    } else {
      CompositeStatus::Mixed
    }
  }
}

/// Derives the composite status of an order from its items.
///
/// Total over every input: an empty sequence is `Pending`, and unrecognized item
/// statuses are counted toward the length but never match a bucket. The result only
/// depends on the counts, so it does not change when the items are reordered.
///
/// ```
/// use farmlink::{derive_status, CompositeStatus, ItemStatus};
///
/// let items = [ItemStatus::Accepted, ItemStatus::Completed];
/// assert_eq!(derive_status(&items), CompositeStatus::MixedAccepted);
/// ```
pub fn derive_status<I>(items: I) -> CompositeStatus
where
  I: IntoIterator,
  I::Item: HasStatus,
{
  StatusCounts::tally(items).composite()
}
