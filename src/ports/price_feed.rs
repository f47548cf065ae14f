//! Price Feed Port - Raw Price List Interface
//!
//! Defines the trait for fetching the current price list from an
//! external source. Normalization (filtering, dedup) is not the
//! port's job; implementors return entries exactly as published.

use async_trait::async_trait;

pub use crate::domain::catalog::PriceEntry;

/// Trait for price list providers.
///
/// One call is one fetch. Implementors must not retry on their own;
/// retry is a user decision surfaced by the quote session.
#[async_trait]
pub trait PriceFeed: Send + Sync + 'static {
  /// Fetch the full price list.
  ///
  /// # Errors
  /// Returns error if the source is unreachable, answers with a
  /// non-success status, or the body is not a JSON array of entries.
  async fn fetch_prices(&self) -> anyhow::Result<Vec<PriceEntry>>;
}
