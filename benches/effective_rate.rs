//! Benchmarks for depth-weighted rate computation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rate_sampler::orderbook::{effective_rate, BookLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ladder(levels: usize) -> Vec<BookLevel> {
    (0..levels)
        .map(|i| BookLevel {
            price: dec!(5.40) + Decimal::from(i as u64) * dec!(0.001),
            size: dec!(250),
        })
        .collect()
}

fn benchmark_shallow_fill(c: &mut Criterion) {
    let book = ladder(10);

    c.bench_function("effective_rate_shallow", |b| {
        b.iter(|| effective_rate(black_box(&book), black_box(dec!(1000))))
    });
}

fn benchmark_deep_fill(c: &mut Criterion) {
    let book = ladder(500);

    c.bench_function("effective_rate_deep", |b| {
        b.iter(|| effective_rate(black_box(&book), black_box(dec!(100000))))
    });
}

criterion_group!(benches, benchmark_shallow_fill, benchmark_deep_fill);
criterion_main!(benches);
