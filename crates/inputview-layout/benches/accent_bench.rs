//! Benchmarks for the accent layout solver.
//!
//! Runs once per popup-show, so the budget is loose:
//! - reorder (8x4 grid): < 2µs
//!
//! Run with: cargo bench -p inputview-layout --bench accent_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use inputview_layout::{fill_order, reorder};
use std::hint::black_box;

fn accent_list(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| char::from_u32(0xE0 + i as u32).map_or_else(String::new, String::from))
        .collect()
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("accents/reorder");

    for (cols, rows) in [(3, 1), (5, 2), (8, 4)] {
        let slots = (cols * rows) as u64;
        let accents = accent_list(cols * rows);
        group.throughput(Throughput::Elements(slots));
        group.bench_with_input(
            BenchmarkId::new("full", format!("{cols}x{rows}")),
            &accents,
            |b, accents| b.iter(|| black_box(reorder(accents, cols, rows, cols / 2))),
        );
    }

    group.finish();
}

fn bench_fill_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("accents/fill_order");

    for cols in [3, 8, 32] {
        group.bench_with_input(BenchmarkId::new("center", cols), &cols, |b, &cols| {
            b.iter(|| black_box(fill_order(cols, cols / 2)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reorder, bench_fill_order);
criterion_main!(benches);
