//! Shortest-path benchmarks on a fixed seeded random graph.
//!
//! Run with `cargo bench --bench shortest_paths`.

use criterion::{criterion_group, criterion_main, Criterion};
use graph_steps_wasm::algorithms::{BellmanFord, Dijkstra, FloydWarshall, Johnson, Spfa};
use graph_steps_wasm::{Algorithm, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Directed graph with `n` vertices and `m` edges of weight 1..=20.
fn generate(n: usize, m: usize) -> Graph<usize> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut g = Graph::with_capacity(true, n, m);
    for v in 0..n {
        g.add_vertex(v);
    }
    for _ in 0..m {
        let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
        let w: u32 = rng.gen_range(1..=20);
        g.add_edge(u, v, w as f64);
    }
    g
}

/// Single-source algorithms on 1000 vertices.
fn bench_single_source(c: &mut Criterion) {
    let g = generate(1000, 5000);

    c.bench_function("dijkstra_1000", |b| {
        b.iter(|| Dijkstra::new(black_box(&g), 0).run())
    });

    c.bench_function("bellman_ford_1000", |b| {
        b.iter(|| BellmanFord::new(black_box(&g), 0).run())
    });

    c.bench_function("spfa_1000", |b| {
        b.iter(|| Spfa::new(black_box(&g), 0).run())
    });
}

/// All-pairs algorithms on 100 vertices.
fn bench_all_pairs(c: &mut Criterion) {
    let g = generate(100, 500);

    c.bench_function("floyd_warshall_100", |b| {
        b.iter(|| FloydWarshall::new(black_box(&g)).run())
    });

    c.bench_function("johnson_100", |b| {
        b.iter(|| Johnson::new(black_box(&g)).run())
    });
}

/// Recording cost compared with a silent run.
fn bench_traced(c: &mut Criterion) {
    let g = generate(1000, 5000);

    c.bench_function("dijkstra_1000_traced", |b| {
        b.iter(|| Dijkstra::new(black_box(&g), 0).run_traced())
    });
}

criterion_group!(benches, bench_single_source, bench_all_pairs, bench_traced);
criterion_main!(benches);
