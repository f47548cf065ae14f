//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that catalog normalization, rate
//! arithmetic, amount validation and direction swapping hold across
//! random inputs.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use swap_quote_engine::domain::amount::{is_acceptable_amount_text, parse_amount};
use swap_quote_engine::domain::catalog::{Catalog, PriceEntry};
use swap_quote_engine::adapters::settlement::SimulatedSettlement;
use swap_quote_engine::config::SessionConfig;
use swap_quote_engine::domain::rate;
use swap_quote_engine::usecases::QuoteSession;

fn raw_entry() -> impl Strategy<Value = PriceEntry> {
    (
        prop::sample::select(vec!["ETH", "USDC", "ATOM", "BLUR", "OSMO", "LUNA"]),
        prop_oneof![
            Just(None),
            Just(Some(0.0)),
            Just(Some(f64::NAN)),
            (-100.0f64..0.0).prop_map(Some),
            (0.0001f64..100_000.0).prop_map(Some),
        ],
    )
        .prop_map(|(currency, price)| PriceEntry::new(currency, price))
}

// ── Catalog Normalization Properties ────────────────────────

proptest! {
    /// Every catalog asset has a strictly positive price and a unique symbol.
    #[test]
    fn catalog_assets_unique_and_positive(entries in prop::collection::vec(raw_entry(), 0..40)) {
        let catalog = Catalog::from_entries(entries);
        let mut seen = HashSet::new();
        for asset in catalog.assets() {
            prop_assert!(asset.unit_price > 0.0, "non-positive price {}", asset.unit_price);
            prop_assert!(seen.insert(asset.symbol.clone()), "duplicate {}", asset.symbol);
        }
    }

    /// Each symbol keeps the price of its first usable entry, in feed order.
    #[test]
    fn catalog_first_usable_entry_wins(entries in prop::collection::vec(raw_entry(), 0..40)) {
        let catalog = Catalog::from_entries(entries.clone());

        let mut expected: Vec<(String, f64)> = Vec::new();
        for e in &entries {
            if let Some(p) = e.price.filter(|p| p.is_finite() && *p > 0.0) {
                if !expected.iter().any(|(s, _)| *s == e.currency) {
                    expected.push((e.currency.clone(), p));
                }
            }
        }

        let actual: Vec<(String, f64)> = catalog
            .assets()
            .iter()
            .map(|a| (a.symbol.clone(), a.unit_price))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// A default pair exists iff there are two assets, and never repeats a symbol.
    #[test]
    fn default_pair_is_distinct(entries in prop::collection::vec(raw_entry(), 0..20)) {
        let catalog = Catalog::from_entries(entries);
        match catalog.default_pair("ETH", "USDC") {
            Some((source, target)) => {
                prop_assert!(catalog.len() >= 2);
                prop_assert_ne!(source.symbol, target.symbol);
            }
            None => prop_assert!(catalog.len() < 2),
        }
    }
}

// ── Rate Properties ─────────────────────────────────────────

proptest! {
    /// Rate times the reverse rate is one for positive prices.
    #[test]
    fn rate_reverse_is_reciprocal(a in 0.001f64..1e6, b in 0.001f64..1e6) {
        let product = rate::rate(a, b) * rate::rate(b, a);
        prop_assert!((product - 1.0).abs() < 1e-9, "product {product}");
    }

    /// A zero price on either side zeroes the rate.
    #[test]
    fn zero_price_zeroes_rate(p in 0.001f64..1e6) {
        prop_assert_eq!(rate::rate(0.0, p), 0.0);
        prop_assert_eq!(rate::rate(p, 0.0), 0.0);
    }

    /// Output is amount times rate, never negative for valid inputs.
    #[test]
    fn output_is_product(amount in 0.0f64..1e9, r in 0.0f64..1e6) {
        let out = rate::output(amount, r);
        prop_assert!(out >= 0.0);
        prop_assert_eq!(out, amount * r);
    }

    /// Display output is empty exactly when the output is not positive.
    #[test]
    fn format_output_empty_iff_not_positive(out in -10.0f64..10.0) {
        prop_assert_eq!(rate::format_output(out).is_empty(), out <= 0.0);
    }
}

// ── Amount Properties ───────────────────────────────────────

proptest! {
    /// Plain decimals are accepted and parse back to their value.
    #[test]
    fn decimal_text_accepted(whole in 0u32..1_000_000, frac in 0u32..1_000_000) {
        let text = format!("{whole}.{frac}");
        prop_assert!(is_acceptable_amount_text(&text));
        let expected: f64 = text.parse().unwrap();
        prop_assert_eq!(parse_amount(&text), expected);
    }

    /// Any text with a character outside digits and '.' is rejected.
    #[test]
    fn foreign_characters_rejected(prefix in "[0-9]{0,4}", bad in "[a-zA-Z+\\-eE, ]", suffix in "[0-9]{0,4}") {
        let text = format!("{prefix}{bad}{suffix}");
        prop_assert!(!is_acceptable_amount_text(&text));
    }

    /// Accepted text never parses to a negative amount.
    #[test]
    fn accepted_text_never_negative(text in "[0-9]{0,6}\\.?[0-9]{0,6}") {
        prop_assert!(is_acceptable_amount_text(&text));
        prop_assert!(parse_amount(&text) >= 0.0);
    }
}

// ── Direction Swap Properties ───────────────────────────────

const SYMBOLS: [&str; 6] = ["ETH", "USDC", "ATOM", "BLUR", "OSMO", "LUNA"];

proptest! {
    /// Swapping direction twice restores the pair, rate and output.
    #[test]
    fn swap_direction_is_an_involution(
        prices in prop::collection::vec(0.0001f64..100_000.0, SYMBOLS.len()),
        pair in (0..SYMBOLS.len(), 1..SYMBOLS.len()),
        amount in "[0-9]{1,6}(\\.[0-9]{1,6})?",
    ) {
        let (source, offset) = pair;
        let target = (source + offset) % SYMBOLS.len();
        let config = SessionConfig {
            primary_symbol: SYMBOLS[source].to_string(),
            secondary_symbol: SYMBOLS[target].to_string(),
            debounce_ms: 0,
        };
        let settlement = SimulatedSettlement::new(Duration::ZERO);
        let mut session = QuoteSession::new(Arc::new(settlement), &config);
        let catalog = Catalog::from_entries(
            SYMBOLS.iter().zip(&prices).map(|(s, p)| PriceEntry::new(*s, Some(*p))),
        );
        prop_assert!(session.apply_catalog(Ok(catalog)));

        prop_assert!(session.set_amount_text(&amount));
        prop_assert!(session.commit_due_input());

        let before = (
            session.source().map(|a| a.symbol.clone()),
            session.target().map(|a| a.symbol.clone()),
            session.rate(),
            session.output(),
        );
        prop_assert_eq!(before.0.as_deref(), Some(SYMBOLS[source]));
        prop_assert_eq!(before.1.as_deref(), Some(SYMBOLS[target]));

        session.swap_direction();
        prop_assert_eq!(session.amount_text(), amount.as_str());
        prop_assert_eq!(session.source().map(|a| a.symbol.as_str()), Some(SYMBOLS[target]));
        let reciprocal = before.2 * session.rate();
        prop_assert!((reciprocal - 1.0).abs() < 1e-9, "rate product {reciprocal}");

        session.swap_direction();
        let after = (
            session.source().map(|a| a.symbol.clone()),
            session.target().map(|a| a.symbol.clone()),
            session.rate(),
            session.output(),
        );
        prop_assert_eq!(after, before);
    }
}
