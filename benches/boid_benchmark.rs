/*
 * Boid Simulation Benchmark
 *
 * Measures grid maintenance, the flocking gather and whole ticks at several
 * population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::vec2;
use std::time::Duration;
use toroidal_boids::{Flock, SimulationConfig};

fn seeded_flock(n: usize, parallel: bool) -> Flock {
    let config = SimulationConfig {
        rng_seed: Some(42),
        parallel,
        ..SimulationConfig::default()
    };
    let mut flock = Flock::new(config).expect("benchmark config is valid");
    for _ in 0..n {
        flock.spawn_random();
    }
    flock
}

// Relocating every boid after a translation
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut flock = seeded_flock(n, false);
            b.iter(|| flock.nudge_all(black_box(vec2(17.0, 9.0))));
        });
    }

    group.finish();
}

// Desired acceleration for every boid, no integration
fn bench_force_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_calculations");

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let flock = seeded_flock(n, false);
            let ids: Vec<_> = flock.iter().map(|(id, _)| id).collect();
            b.iter(|| {
                let rules = flock.rules();
                for &id in &ids {
                    black_box(rules.desired_for(id));
                }
            });
        });
    }

    group.finish();
}

fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    for num_boids in [100, 500, 1000, 2000].iter() {
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "serial" };
            group.bench_with_input(BenchmarkId::new(label, num_boids), num_boids, |b, &n| {
                let mut flock = seeded_flock(n, parallel);
                b.iter(|| black_box(flock.tick(1.0 / 60.0)));
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_force_calculations, bench_update_loop
}
criterion_main!(benches);
