//! Price catalog normalization.
//!
//! Turns the raw feed list into an ordered, deduplicated set of quotable
//! assets. Entries with an absent, zero, negative or non-finite price are
//! dropped; duplicates are resolved first-seen-wins.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::asset::Asset;

/// One entry of the inbound price list.
///
/// Unknown fields in the feed are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Asset symbol as reported by the feed.
    pub currency: String,
    /// Unit price; some feeds publish entries with no price at all.
    /// A non-numeric value reads as no price.
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    /// Quote timestamp (RFC 3339), kept as text until normalization.
    /// A non-string value reads as no timestamp.
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

/// Decode `T`, or `None` for null or a value of any other JSON type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Value(v)) => Some(v),
        Some(Lenient::Other(_)) | None => None,
    })
}

impl PriceEntry {
    /// Create an entry with a price and no timestamp.
    pub fn new(currency: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            currency: currency.into(),
            price,
            date: None,
        }
    }

    /// The price, if it is usable for quoting.
    fn usable_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Parse the timestamp; a malformed date never rejects the entry.
    fn quoted_at(&self) -> Option<DateTime<Utc>> {
        self.date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Immutable snapshot of quotable assets from one feed fetch.
///
/// Invariants: no two assets share a symbol, every `unit_price > 0`,
/// order is the feed's first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    assets: Vec<Asset>,
}

impl Catalog {
    /// Normalize raw feed entries into a catalog.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PriceEntry>,
    {
        let mut seen = HashSet::new();
        let assets = entries
            .into_iter()
            .filter_map(|entry| {
                let price = entry.usable_price()?;
                if !seen.insert(entry.currency.clone()) {
                    return None;
                }
                let quoted_at = entry.quoted_at();
                Some(Asset::new(entry.currency, price).with_quoted_at(quoted_at))
            })
            .collect();

        Self { assets }
    }

    /// All assets in first-seen order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Number of quotable assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the snapshot holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by exact symbol.
    pub fn get(&self, symbol: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.is(symbol))
    }

    /// Assets offered to a picker: everything except `exclude`, narrowed
    /// by a case-insensitive substring match on the symbol.
    pub fn candidates(&self, exclude: Option<&str>, query: &str) -> Vec<&Asset> {
        let needle = query.trim().to_lowercase();
        self.assets
            .iter()
            .filter(|a| exclude.is_none_or(|ex| !a.is(ex)))
            .filter(|a| a.symbol.to_lowercase().contains(&needle))
            .collect()
    }

    /// Pick the initial (source, target) pair.
    ///
    /// Prefers `primary` / `secondary` when listed, falling back to the
    /// first two entries. The pair never shares a symbol.
    pub fn default_pair(&self, primary: &str, secondary: &str) -> Option<(Asset, Asset)> {
        if self.assets.len() < 2 {
            return None;
        }

        let source = self.get(primary).unwrap_or(&self.assets[0]);
        let target = self
            .get(secondary)
            .unwrap_or(&self.assets[1]);
        let target = if target == source {
            self.assets.iter().find(|a| *a != source)?
        } else {
            target
        };

        Some((source.clone(), target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(currency: &str, price: Option<f64>) -> PriceEntry {
        PriceEntry::new(currency, price)
    }

    fn symbols(catalog: &Catalog) -> Vec<&str> {
        catalog.assets().iter().map(|a| a.symbol.as_str()).collect()
    }

    #[test]
    fn test_first_seen_wins() {
        let catalog = Catalog::from_entries(vec![
            entry("A", Some(1.0)),
            entry("B", Some(2.0)),
            entry("A", Some(5.0)),
        ]);

        assert_eq!(symbols(&catalog), vec!["A", "B"]);
        assert_eq!(catalog.get("A").map(|a| a.unit_price), Some(1.0));
    }

    #[test]
    fn test_drops_unpriced_entries() {
        let catalog = Catalog::from_entries(vec![
            entry("NONE", None),
            entry("ZERO", Some(0.0)),
            entry("NEG", Some(-3.0)),
            entry("NAN", Some(f64::NAN)),
            entry("INF", Some(f64::INFINITY)),
            entry("OK", Some(0.5)),
        ]);

        assert_eq!(symbols(&catalog), vec!["OK"]);
    }

    #[test]
    fn test_invalid_first_entry_does_not_shadow_later_valid_one() {
        let catalog = Catalog::from_entries(vec![entry("A", Some(0.0)), entry("A", Some(4.0))]);
        assert_eq!(catalog.get("A").map(|a| a.unit_price), Some(4.0));
    }

    #[test]
    fn test_parses_rfc3339_date_leniently() {
        let mut dated = entry("ETH", Some(1645.9));
        dated.date = Some("2023-08-29T07:10:52.000Z".to_string());
        let mut garbled = entry("USDC", Some(1.0));
        garbled.date = Some("yesterday".to_string());

        let catalog = Catalog::from_entries(vec![dated, garbled]);

        assert!(catalog.get("ETH").and_then(|a| a.quoted_at).is_some());
        assert!(catalog.get("USDC").is_some_and(|a| a.quoted_at.is_none()));
    }

    #[test]
    fn test_candidates_exclude_counterpart_and_filter() {
        let catalog = Catalog::from_entries(vec![
            entry("ETH", Some(1.0)),
            entry("USDC", Some(1.0)),
            entry("USD", Some(1.0)),
            entry("ATOM", Some(1.0)),
        ]);

        let all: Vec<_> = catalog.candidates(Some("ETH"), "").iter().map(|a| a.symbol.clone()).collect();
        assert_eq!(all, vec!["USDC", "USD", "ATOM"]);

        let usd: Vec<_> = catalog.candidates(Some("USDC"), "us").iter().map(|a| a.symbol.clone()).collect();
        assert_eq!(usd, vec!["USD"]);

        assert_eq!(catalog.candidates(None, "xyz").len(), 0);
    }

    #[test]
    fn test_default_pair_prefers_designated_symbols() {
        let catalog = Catalog::from_entries(vec![
            entry("ATOM", Some(7.0)),
            entry("USDC", Some(1.0)),
            entry("ETH", Some(1800.0)),
        ]);

        let (source, target) = catalog.default_pair("ETH", "USDC").unwrap();
        assert_eq!(source.symbol, "ETH");
        assert_eq!(target.symbol, "USDC");
    }

    #[test]
    fn test_default_pair_falls_back_to_first_two() {
        let catalog = Catalog::from_entries(vec![entry("ATOM", Some(7.0)), entry("OSMO", Some(0.4))]);

        let (source, target) = catalog.default_pair("ETH", "USDC").unwrap();
        assert_eq!(source.symbol, "ATOM");
        assert_eq!(target.symbol, "OSMO");
    }

    #[test]
    fn test_default_pair_never_collides() {
        // Primary missing, secondary is the first entry.
        let catalog = Catalog::from_entries(vec![entry("USDC", Some(1.0)), entry("ATOM", Some(7.0))]);

        let (source, target) = catalog.default_pair("ETH", "USDC").unwrap();
        assert_eq!(source.symbol, "USDC");
        assert_eq!(target.symbol, "ATOM");
    }

    #[test]
    fn test_default_pair_needs_two_assets() {
        let catalog = Catalog::from_entries(vec![entry("ETH", Some(1.0))]);
        assert!(catalog.default_pair("ETH", "USDC").is_none());
    }
}
