//! Price Catalog - Feed Fetch and Normalization
//!
//! Loads the raw price list through the `PriceFeed` port and turns it
//! into a `Catalog` snapshot. Every failure collapses into a
//! `FetchError` carrying a user-facing message. No automatic retry.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::catalog::Catalog;
use crate::domain::error::FetchError;
use crate::ports::price_feed::PriceFeed;

/// Loads catalog snapshots from a price feed.
pub struct PriceCatalog<F: PriceFeed> {
  /// Price feed port.
  feed: Arc<F>,
}

impl<F: PriceFeed> PriceCatalog<F> {
  /// Create a catalog loader over a feed.
  pub fn new(feed: Arc<F>) -> Self {
    Self { feed }
  }

  /// Fetch and normalize the current price list.
  ///
  /// # Errors
  /// Returns `FetchError` if the feed is unreachable or malformed.
  #[instrument(skip(self), name = "price_catalog_load")]
  pub async fn load(&self) -> Result<Catalog, FetchError> {
    match self.feed.fetch_prices().await {
      Ok(entries) => {
        let raw = entries.len();
        let catalog = Catalog::from_entries(entries);
        info!(
          raw,
          assets = catalog.len(),
          dropped = raw - catalog.len(),
          "Price catalog loaded"
        );
        Ok(catalog)
      }
      Err(e) => {
        warn!(error = %e, "Price feed fetch failed");
        Err(FetchError::from_cause(&e))
      }
    }
  }
}

impl<F: PriceFeed> Clone for PriceCatalog<F> {
  fn clone(&self) -> Self {
    Self {
      feed: Arc::clone(&self.feed),
    }
  }
}
