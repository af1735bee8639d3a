//! Benchmarks for graph building and perturbation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proxima::{select_attractors, GraphBuilder, GraphStats, Gravity, PointSet};
use rand::prelude::*;

fn random_points(n: usize) -> PointSet {
    let mut rng = StdRng::seed_from_u64(42);
    PointSet::random_unit_cube(n, 3, &mut rng).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    group.sample_size(20);

    for n in [100, 500, 1000] {
        let points = random_points(n);
        for p in [1.0, 5.0, 25.0] {
            let builder = GraphBuilder::new(p).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("p{p}"), n), &n, |bench, _| {
                bench.iter(|| builder.build(black_box(points.clone())))
            });
        }
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let structure = GraphBuilder::new(5.0).unwrap().build(random_points(1000));
    c.bench_function("graph_stats_1000", |bench| {
        bench.iter(|| GraphStats::of(black_box(structure.graph())))
    });
}

fn bench_gravity(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let points = random_points(1000);
    let attractors = select_attractors(1000, 5, &mut rng).unwrap();
    let gravity = Gravity::default();

    c.bench_function("gravity_1000x5", |bench| {
        bench.iter_batched(
            || points.clone(),
            |mut p| gravity.apply(&mut p, black_box(&attractors)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build, bench_stats, bench_gravity);
criterion_main!(benches);
