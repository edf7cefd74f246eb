//! Benchmark for the eager combinators and accessors.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shapefold::access::{get, len};
use shapefold::combinator::{distinct, group, key_fn, natural, partition, predicate, sort};
use shapefold::lazy::seq;
use shapefold::shape::{is_int, is_string};
use shapefold::{Key, Value, record};
use std::hint::black_box;

fn records(size: i64) -> Value {
    (0..size)
        .map(|index| record! { id: index, bucket: index % 7, label: format!("item-{index}") })
        .collect()
}

fn mixed(size: i64) -> Value {
    (0..size)
        .map(|index| {
            if index % 3 == 0 {
                Value::from(format!("s{index}"))
            } else {
                Value::Int(index % 50)
            }
        })
        .collect()
}

// =============================================================================
// Bucketing
// =============================================================================

fn benchmark_group(criterion: &mut Criterion) {
    let mut bench_group = criterion.benchmark_group("group");

    for size in [100_i64, 1000, 10000] {
        let input = records(size);
        let by_bucket = group([key_fn(|item: &Value| item.field("bucket"))]);
        bench_group.bench_with_input(BenchmarkId::new("one_level", size), &input, |bencher, input| {
            bencher.iter(|| black_box(by_bucket(input.clone())));
        });
    }

    bench_group.finish();
}

fn benchmark_partition_distinct(criterion: &mut Criterion) {
    let mut bench_group = criterion.benchmark_group("partition_distinct");

    for size in [1000_i64, 10000] {
        let input = mixed(size);
        let split = partition([predicate(is_string), predicate(is_int)]);
        bench_group.bench_with_input(BenchmarkId::new("partition", size), &input, |bencher, input| {
            bencher.iter(|| black_box(split(input.clone())));
        });
        bench_group.bench_with_input(BenchmarkId::new("distinct", size), &input, |bencher, input| {
            bencher.iter(|| black_box(distinct(input.clone())));
        });
    }

    bench_group.finish();
}

// =============================================================================
// Sorting
// =============================================================================

fn benchmark_sort(criterion: &mut Criterion) {
    let mut bench_group = criterion.benchmark_group("sort");
    let ascending = sort(natural);

    for size in [1000_i64, 10000] {
        let input = mixed(size);
        bench_group.bench_with_input(BenchmarkId::new("natural", size), &input, |bencher, input| {
            bencher.iter(|| black_box(ascending(input.clone())));
        });
    }

    bench_group.finish();
}

// =============================================================================
// Accessors
// =============================================================================

fn benchmark_access(criterion: &mut Criterion) {
    let mut bench_group = criterion.benchmark_group("access");
    let input = records(1000);
    let lookup = get([Key::from(500), Key::from("label")]);

    bench_group.bench_function("get_nested", |bencher| {
        bencher.iter(|| black_box(lookup(input.clone())));
    });
    bench_group.bench_function("len_lazy", |bencher| {
        let range = seq(1, 10000);
        bencher.iter(|| black_box(len(&range)));
    });

    bench_group.finish();
}

criterion_group!(
    benches,
    benchmark_group,
    benchmark_partition_distinct,
    benchmark_sort,
    benchmark_access
);
criterion_main!(benches);
