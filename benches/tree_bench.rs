//! Build, query and update benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perseg::{algebra::Sum, PersistentSegmentTree, SegmentTree};

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in [1_000usize, 100_000] {
        let values: Vec<i64> = (0..size as i64).collect();
        group.bench_with_input(BenchmarkId::new("persistent", size), &values, |b, values| {
            b.iter(|| PersistentSegmentTree::new(black_box(values), Sum::new()))
        });
        group.bench_with_input(BenchmarkId::new("plain", size), &values, |b, values| {
            b.iter(|| SegmentTree::new(black_box(values), Sum::new()))
        });
    }
    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let size = 100_000usize;
    let values: Vec<i64> = (0..size as i64).collect();
    let mut tree = PersistentSegmentTree::new(&values, Sum::new()).expect("non-empty");
    for i in 0..1_000 {
        tree.update((i * 7919) % size, -1).expect("valid index");
    }

    c.bench_function("query_old_version", |b| {
        b.iter(|| tree.query(black_box(0), black_box(123), black_box(98_765)))
    });
    c.bench_function("query_latest_version", |b| {
        b.iter(|| tree.query_current(black_box(123), black_box(98_765)))
    });
}

fn benchmark_update(c: &mut Criterion) {
    let size = 100_000usize;
    let values: Vec<i64> = (0..size as i64).collect();

    c.bench_function("update_path_copy", |b| {
        let mut tree = PersistentSegmentTree::new(&values, Sum::new()).expect("non-empty");
        let mut index = 0;
        b.iter(|| {
            index = (index + 7919) % size;
            tree.update(black_box(index), black_box(1))
        })
    });

    c.bench_function("update_in_place", |b| {
        let mut tree = SegmentTree::new(&values, Sum::new()).expect("non-empty");
        let mut index = 0;
        b.iter(|| {
            index = (index + 7919) % size;
            tree.update(black_box(index), black_box(1))
        })
    });
}

criterion_group!(benches, benchmark_build, benchmark_query, benchmark_update);
criterion_main!(benches);
