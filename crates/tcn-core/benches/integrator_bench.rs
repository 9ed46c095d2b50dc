// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Integrator Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tcn_core::collision::run_collision;
use tcn_core::integrator::{FieldIntegrator, SamplingPolicy};
use tcn_core::leapfrog::LeapfrogWaveIntegrator;
use tcn_core::memory_feedback::MemoryFeedbackIntegrator;
use tcn_math::packet::{gaussian_packet, travelling_packet};
use tcn_types::config::{IntegratorKind, PhysicsParameters, SimulationConfig};
use tcn_types::state::{Grid1D, TimeAxis};

fn bench_memory_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_feedback");
    let grid = Grid1D::new(10.0, 201).expect("valid grid");
    let time = TimeAxis::new(150e-6, 1e-6).expect("valid time axis");
    let initial = travelling_packet(&grid.x, 3.0, 0.3, 5.0);

    for &depth in &[1usize, 10, 50] {
        let params = PhysicsParameters {
            memory_depth: depth,
            ..PhysicsParameters::default()
        };
        let integrator =
            MemoryFeedbackIntegrator::new(grid.clone(), time, params, SamplingPolicy::default())
                .expect("valid integrator");
        group.bench_function(format!("n201_s150_depth{depth}"), |b| {
            b.iter(|| {
                let history = integrator
                    .integrate(black_box(&initial))
                    .expect("integration should succeed");
                black_box(history.len());
            })
        });
    }
    group.finish();
}

fn bench_leapfrog(c: &mut Criterion) {
    let grid = Grid1D::new(10.0, 201).expect("valid grid");
    let time = TimeAxis::new(50e-6, 0.5e-6).expect("valid time axis");
    let initial = gaussian_packet(&grid.x, 3.0, 0.3, 5.0);
    let integrator =
        LeapfrogWaveIntegrator::new(grid, time, 1.0, 0.01, SamplingPolicy::every(5).expect("stride"))
            .expect("valid integrator");

    c.bench_function("leapfrog_n201_s100", |b| {
        b.iter(|| {
            let history = integrator
                .integrate(black_box(&initial))
                .expect("integration should succeed");
            black_box(history.len());
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision");
    let mut cfg = SimulationConfig::default();
    for parallel in [false, true] {
        cfg.parallel_packets = parallel;
        let cfg = cfg.clone();
        group.bench_function(if parallel { "parallel" } else { "serial" }, |b| {
            b.iter(|| {
                let report = run_collision(black_box(&cfg)).expect("collision should run");
                black_box(report.combined_intensity[[0, 0]]);
            })
        });
    }
    cfg.integrator = IntegratorKind::Leapfrog;
    cfg.sampling.snapshot_indices = vec![0, 45, 75, 145];
    group.bench_function("leapfrog", |b| {
        b.iter(|| {
            let report = run_collision(black_box(&cfg)).expect("collision should run");
            black_box(report.combined_intensity[[0, 0]]);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_memory_feedback, bench_leapfrog, bench_collision);
criterion_main!(benches);
