//! Criterion benchmarks for the timetabling pipelines.
//!
//! Uses random conflict graphs of fixed density so that timings reflect
//! algorithm overhead rather than a particular instance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_timetable::graph::{Assignment, ConflictGraph};
use u_timetable::greedy::{GreedyColorer, GreedyStrategy};
use u_timetable::local::{LocalSearchConfig, LocalSearchRunner};
use u_timetable::sa::{AnnealConfig, AnnealRunner};

/// Erdős–Rényi style graph with edge probability `p`.
fn random_graph(n: usize, p: f64, seed: u64) -> ConflictGraph<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = ConflictGraph::with_courses(0..n);
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random_range(0.0..1.0) < p {
                let _ = graph.add_conflict(i, j);
            }
        }
    }
    graph
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for &n in &[100usize, 500, 1000] {
        let graph = random_graph(n, 0.1, 42);
        for strategy in [GreedyStrategy::LargestDegreeFirst, GreedyStrategy::Dsatur] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), n),
                &graph,
                |b, g| b.iter(|| black_box(GreedyColorer::color_with(black_box(g), strategy))),
            );
        }
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(10);

    for &n in &[50usize, 100, 200] {
        let graph = random_graph(n, 0.1, 42);
        let config = LocalSearchConfig::default().with_time_limit_ms(10_000);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| {
                let result = LocalSearchRunner::run(black_box(g), Assignment::uniform(n, 1), &config);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing");
    group.sample_size(10);

    for &n in &[50usize, 100, 200] {
        let graph = random_graph(n, 0.1, 42);
        let initial = GreedyColorer::color(&graph);
        let config = AnnealConfig::default().with_max_iterations(2000).with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(graph, initial),
            |b, (g, init)| {
                b.iter(|| {
                    let result = AnnealRunner::run(black_box(g), init.clone(), &config);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_local_search, bench_annealing);
criterion_main!(benches);
