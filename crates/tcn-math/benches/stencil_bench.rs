// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Stencil and Kernel Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use num_complex::Complex64;
use std::hint::black_box;
use tcn_math::history::HistoryWindow;
use tcn_math::kernel::MemoryKernel;
use tcn_math::packet::travelling_packet;
use tcn_math::stencil::{laplacian_into, Boundary};

fn bench_periodic_laplacian(c: &mut Criterion) {
    let mut group = c.benchmark_group("periodic_laplacian");
    for &n in &[201usize, 1001, 10001] {
        let x = Array1::linspace(0.0, 10.0, n);
        let field = travelling_packet(&x, 5.0, 0.3, 5.0);
        let dx = 10.0 / (n as f64 - 1.0);
        let mut out = Array1::from_elem(n, Complex64::new(0.0, 0.0));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                laplacian_into(black_box(field.view()), dx, Boundary::Periodic, &mut out)
                    .expect("valid stencil input");
                black_box(out[0]);
            })
        });
    }
    group.finish();
}

/// Full-depth memory sum over a 201-point complex field.
fn bench_memory_kernel(c: &mut Criterion) {
    let kernel = MemoryKernel::exponential(0.03, 10).expect("valid kernel");
    let mut window = HistoryWindow::new(10, 201).expect("valid window");
    let x = Array1::linspace(0.0, 10.0, 201);
    for _ in 0..10 {
        window
            .push(travelling_packet(&x, 2.5, 0.3, 5.0))
            .expect("matching length");
    }
    let mut out = Array1::from_elem(201, Complex64::new(0.0, 0.0));
    c.bench_function("memory_kernel_depth10_201", |b| {
        b.iter(|| {
            let used = kernel.apply_into(&window, &mut out).expect("valid kernel input");
            black_box(used)
        })
    });
}

criterion_group!(benches, bench_periodic_laplacian, bench_memory_kernel);
criterion_main!(benches);
