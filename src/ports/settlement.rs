//! Swap Settlement Port - Order Submission Interface
//!
//! Defines the trait the quote session uses to submit a swap. The
//! shipped adapter only simulates latency; a real venue would plug in
//! here without touching the session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::swap::SwapOrder;

/// Acknowledgement of a settled swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementReceipt {
  /// Settlement-side reference (transaction hash, ticket, ...).
  pub reference: String,
  /// When settlement completed.
  pub settled_at: DateTime<Utc>,
}

/// Trait for swap settlement providers.
#[async_trait]
pub trait SwapSettlement: Send + Sync + 'static {
  /// Settle a swap order.
  ///
  /// # Errors
  /// Returns error if the order could not be settled. The caller keeps
  /// the user's input so the swap can be retried.
  async fn settle(&self, order: &SwapOrder) -> anyhow::Result<SettlementReceipt>;
}
