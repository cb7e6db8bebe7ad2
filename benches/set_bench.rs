//! Set benchmarks.
//!
//! Measures batch insertion against one-value-per-lock insertion, the
//! smaller-side walk of `intersection`, and read throughput under writer
//! contention.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::thread;
use syncset::Set;

const SIZES: [usize; 3] = [100, 1000, 10000];

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_insert");

    for size in SIZES {
        let values: Vec<usize> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("batch", size), &size, |bencher, _| {
            bencher.iter_batched(
                || values.clone(),
                |values| {
                    let set = Set::new();
                    set.insert(values);
                    black_box(set)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("one_by_one", size), &size, |bencher, _| {
            bencher.iter_batched(
                || values.clone(),
                |values| {
                    let set = Set::new();
                    for value in values {
                        set.insert([value]);
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_intersection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_intersection");

    for size in SIZES {
        let small: Set<usize> = (0..10).collect();
        let large: Set<usize> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("small_receiver", size), &size, |bencher, _| {
            bencher.iter(|| black_box(small.intersection(black_box(&large))));
        });

        group.bench_with_input(BenchmarkId::new("large_receiver", size), &size, |bencher, _| {
            bencher.iter(|| black_box(large.intersection(black_box(&small))));
        });
    }

    group.finish();
}

fn benchmark_contended_reads(criterion: &mut Criterion) {
    let set: Set<usize> = (0..1000).collect();

    criterion.bench_function("set_has_with_writer", |bencher| {
        bencher.iter(|| {
            thread::scope(|scope| {
                scope.spawn(|| {
                    for value in 1000..1100 {
                        set.insert([value]);
                    }
                    set.retain(|value| *value < 1000);
                });
                for value in 0..1000 {
                    black_box(set.has(&value));
                }
            });
        });
    });
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_intersection,
    benchmark_contended_reads
);
criterion_main!(benches);
