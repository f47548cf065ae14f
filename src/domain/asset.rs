//! Quotable asset records.
//!
//! An `Asset` is produced only by catalog normalization and is never
//! mutated afterwards. Identity is the symbol: two assets with the same
//! symbol are equal regardless of price.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight asset symbol used at the ports boundary.
pub type Symbol = String;

/// A token with a known, strictly positive unit price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Unique key within a catalog snapshot (e.g., "ETH").
    pub symbol: Symbol,
    /// Unit price in the feed's quote currency (always > 0).
    pub unit_price: f64,
    /// Time the feed quoted this price, when it reported one.
    pub quoted_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Create an asset without a quote timestamp.
    pub fn new(symbol: impl Into<Symbol>, unit_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            unit_price,
            quoted_at: None,
        }
    }

    /// Attach the feed's quote timestamp.
    #[must_use]
    pub fn with_quoted_at(mut self, quoted_at: Option<DateTime<Utc>>) -> Self {
        self.quoted_at = quoted_at;
        self
    }

    /// Whether this asset carries the given symbol.
    pub fn is(&self, symbol: &str) -> bool {
        self.symbol == symbol
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Asset {}

impl std::hash::Hash for Asset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
