// farmlink/src/orders/batch.rs

//! Per-item outcomes of an order-level status change.

use crate::error::{ClientError, ClientResult};
use crate::models::Order;
use crate::status::ItemStatus;

#[derive(Debug)]
pub struct ItemUpdateOutcome {
  pub item_id: u64,
  pub result: ClientResult<()>,
}

impl ItemUpdateOutcome {
  pub fn is_ok(&self) -> bool {
    self.result.is_ok()
  }
}

/// Result of updating every item of one order to the same status.
///
/// Updates are independent requests, so some may land while others fail. The report
/// keeps each outcome instead of stopping at the first error; callers that want
/// all-or-nothing use `into_result`.
#[derive(Debug)]
pub struct BatchUpdate {
  pub order_id: u64,
  pub target: ItemStatus,
  pub outcomes: Vec<ItemUpdateOutcome>,
}

impl BatchUpdate {
  pub fn is_complete(&self) -> bool {
    self.outcomes.iter().all(ItemUpdateOutcome::is_ok)
  }

  pub fn succeeded(&self) -> impl Iterator<Item = u64> + '_ {
    self.outcomes.iter().filter(|o| o.is_ok()).map(|o| o.item_id)
  }

  pub fn failures(&self) -> impl Iterator<Item = (u64, &ClientError)> + '_ {
    self
      .outcomes
      .iter()
      .filter_map(|o| o.result.as_ref().err().map(|e| (o.item_id, e)))
  }

  pub fn failure_count(&self) -> usize {
    self.failures().count()
  }

  /// Whether re-running the failed part could help: every failure was a timeout or
  /// a network error.
  pub fn is_retryable(&self) -> bool {
    let mut failures = self.failures().peekable();
    failures.peek().is_some() && failures.all(|(_, e)| e.is_retryable())
  }

  /// The first failure, in item order, if any.
  pub fn into_result(self) -> ClientResult<()> {
    match self.outcomes.into_iter().find_map(|o| o.result.err()) {
      Some(err) => Err(err),
      None => Ok(()),
    }
  }
}

/// A batch update followed by a reload of the order list.
///
/// The reload runs after every item update has settled, so its failure says nothing
/// about the updates themselves; `batch` is always the real outcome.
#[derive(Debug)]
pub struct ReloadedUpdate {
  pub batch: BatchUpdate,
  pub orders: ClientResult<Vec<Order>>,
}
