//! Quote Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the work done on every feed load and every committed
//! keystroke: catalog normalization, amount parsing and rate math.
//!
//! Run with: cargo bench --bench quote_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use swap_quote_engine::domain::amount::{is_acceptable_amount_text, parse_amount};
use swap_quote_engine::domain::catalog::{Catalog, PriceEntry};
use swap_quote_engine::domain::rate;

/// A feed-sized list with duplicates and unusable prices mixed in.
fn sample_entries() -> Vec<PriceEntry> {
    (0..200)
        .map(|i| {
            let price = match i % 7 {
                0 => None,
                1 => Some(0.0),
                _ => Some(f64::from(i) * 1.37),
            };
            PriceEntry::new(format!("TKN{}", i % 120), price)
        })
        .collect()
}

/// Benchmark normalizing a raw price list into a catalog.
fn bench_catalog_from_entries(c: &mut Criterion) {
    let entries = sample_entries();

    c.bench_function("catalog_from_200_entries", |b| {
        b.iter(|| Catalog::from_entries(black_box(entries.clone())));
    });
}

/// Benchmark the picker search over a normalized catalog.
fn bench_candidates(c: &mut Criterion) {
    let catalog = Catalog::from_entries(sample_entries());

    c.bench_function("catalog_candidates_query", |b| {
        b.iter(|| catalog.candidates(black_box(Some("TKN5")), black_box("tkn1")).len());
    });
}

/// Benchmark one committed keystroke: validate, parse, convert, format.
fn bench_keystroke_recompute(c: &mut Criterion) {
    c.bench_function("keystroke_recompute", |b| {
        b.iter(|| {
            let text = black_box("1234.5678");
            let accepted = is_acceptable_amount_text(text);
            let amount = parse_amount(text);
            let r = rate::rate(black_box(1645.93), black_box(0.99));
            let out = rate::output(amount, r);
            (accepted, rate::format_output(out))
        });
    });
}

/// Benchmark en-US currency formatting used by the token list.
fn bench_format_currency(c: &mut Criterion) {
    c.bench_function("format_currency", |b| {
        b.iter(|| rate::format_currency(black_box(1_234_567.891_234), 2, 6));
    });
}

criterion_group!(
    benches,
    bench_catalog_from_entries,
    bench_candidates,
    bench_keystroke_recompute,
    bench_format_currency,
);
criterion_main!(benches);
