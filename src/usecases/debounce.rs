//! Debouncer - Cancelable Pending-Value Slot
//!
//! Holds at most one pending value with a deadline. Scheduling a new
//! value replaces the old one and restarts the clock, so only the last
//! value of a burst is ever delivered. Waiting is cancel-safe: dropping
//! the `settled()` future leaves the pending value untouched, which
//! makes it safe to race inside `tokio::select!`.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Single-flight delayed delivery of the most recent value.
#[derive(Debug)]
pub struct Debouncer<T> {
  /// Required quiet period after the last `schedule`.
  delay: Duration,
  /// The value waiting to be delivered, if any.
  pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
  value: T,
  deadline: Instant,
}

impl<T> Debouncer<T> {
  /// Create an empty debouncer.
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      pending: None,
    }
  }

  /// The quiet period.
  pub fn delay(&self) -> Duration {
    self.delay
  }

  /// Replace any pending value and restart the timer.
  ///
  /// Returns `true` if an earlier pending value was discarded.
  pub fn schedule(&mut self, value: T) -> bool {
    let replaced = self.pending.is_some();
    self.pending = Some(Pending {
      value,
      deadline: Instant::now() + self.delay,
    });
    replaced
  }

  /// Drop the pending value, returning it.
  pub fn cancel(&mut self) -> Option<T> {
    self.pending.take().map(|p| p.value)
  }

  /// Whether a value is waiting.
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }

  /// When the pending value becomes due.
  pub fn deadline(&self) -> Option<Instant> {
    self.pending.as_ref().map(|p| p.deadline)
  }

  /// Take the pending value if its deadline has passed.
  pub fn take_due(&mut self) -> Option<T> {
    let due = self
      .pending
      .as_ref()
      .is_some_and(|p| p.deadline <= Instant::now());
    if due { self.cancel() } else { None }
  }

  /// Wait until the pending value is due and take it.
  ///
  /// Never completes while nothing is pending.
  pub async fn settled(&mut self) -> T {
    loop {
      let Some(deadline) = self.deadline() else {
        return std::future::pending().await;
      };
      sleep_until(deadline).await;
      if let Some(value) = self.take_due() {
        return value;
      }
    }
  }
}
