// farmlink/src/client/policy.rs

use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Which kind of transient failure is being retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  Timeout,
  Network,
}

/// Retry, backoff and per-attempt timeout settings for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries after the first attempt. Total attempts are `max_retries + 1`.
  pub max_retries: u32,
  /// Base backoff.
  pub retry_delay: Duration,
  /// Bound on a single attempt, not on the whole call.
  pub timeout: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_retries: DEFAULT_MAX_RETRIES,
      retry_delay: DEFAULT_RETRY_DELAY,
      timeout: DEFAULT_TIMEOUT,
    }
  }
}

impl RetryPolicy {
  /// A policy that never retries.
  pub fn no_retries() -> Self {
    Self {
      max_retries: 0,
      ..Self::default()
    }
  }

  pub fn with_max_retries(mut self, max_retries: u32) -> Self {
    self.max_retries = max_retries;
    self
  }

  pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
    self.retry_delay = retry_delay;
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Delay to wait before retry number `retry` (1-based).
  ///
  /// Network failures back off exponentially, `retry_delay * 2^(retry - 1)`.
  /// Timeouts already cost a full `timeout` each, so they wait a flat `retry_delay`.
  pub fn delay_before_retry(&self, retry: u32, kind: FailureKind) -> Duration {
    match kind {
      FailureKind::Timeout => self.retry_delay,
      FailureKind::Network => {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.retry_delay.saturating_mul(factor)
      }
    }
  }

  /// Upper bound on the time one `execute` can take when every attempt times out
  /// and every backoff is the longest possible.
  pub fn worst_case(&self) -> Duration {
    let attempts = self.max_retries.saturating_add(1);
    let mut total = self.timeout.saturating_mul(attempts);
    for retry in 1..=self.max_retries {
      total = total.saturating_add(self.delay_before_retry(retry, FailureKind::Network));
    }
    total
  }
}
