//! Benchmark for the lazy sequence engine.
//!
//! Compares chained lazy stages against the same work done over a
//! materialized sequence and against a plain iterator.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shapefold::combinator::{array, batch, filter, flatten, limit, map};
use shapefold::lazy::{count_from, seq};
use shapefold::{Value, pipe};
use std::hint::black_box;

fn int(value: &Value) -> i64 {
    value.as_int().unwrap_or(0)
}

// =============================================================================
// map/filter pipeline
// =============================================================================

fn benchmark_map_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter");

    for size in [100_i64, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("lazy", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let result = pipe!(
                    seq(1, size),
                    map(|x: Value| Value::Int(int(&x) * 3)),
                    filter(|x: &Value| int(x) % 2 == 0),
                    array,
                );
                black_box(result)
            });
        });

        let materialized = array(seq(1, size)).unwrap_or_default();
        group.bench_with_input(
            BenchmarkId::new("materialized", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let result = pipe!(
                        materialized.clone(),
                        map(|x: Value| Value::Int(int(&x) * 3)),
                        filter(|x: &Value| int(x) % 2 == 0),
                        array,
                    );
                    black_box(result)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("iterator", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let result: Vec<Value> = (1..=size)
                    .map(|x| Value::Int(x * 3))
                    .filter(|x| int(x) % 2 == 0)
                    .collect();
                black_box(result)
            });
        });
    }

    group.finish();
}

// =============================================================================
// limit over an infinite producer
// =============================================================================

fn benchmark_limit(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("limit_infinite");

    for count in [10_usize, 1000] {
        group.bench_with_input(BenchmarkId::new("count_from", count), &count, |bencher, &count| {
            bencher.iter(|| black_box(pipe!(count_from(0), limit(count), array)));
        });
    }

    group.finish();
}

// =============================================================================
// batch and flatten
// =============================================================================

fn benchmark_batch_flatten(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("batch_flatten");

    for size in [1000_i64, 10000] {
        group.bench_with_input(BenchmarkId::new("round_trip", size), &size, |bencher, &size| {
            bencher.iter(|| black_box(pipe!(seq(1, size), batch(64), flatten(1), array)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map_filter,
    benchmark_limit,
    benchmark_batch_flatten
);
criterion_main!(benches);
