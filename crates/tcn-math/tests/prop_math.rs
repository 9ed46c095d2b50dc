// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Property-Based Tests (proptest) for tcn-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for tcn-math using proptest.
//!
//! Covers: Laplacian stencils, memory kernel weights and truncation,
//! history window eviction, packet envelopes.

use ndarray::Array1;
use proptest::prelude::*;
use tcn_math::history::HistoryWindow;
use tcn_math::kernel::MemoryKernel;
use tcn_math::packet::{gaussian_envelope, gaussian_packet};
use tcn_math::stencil::{laplacian, Boundary};

// ── Laplacian Properties ─────────────────────────────────────────────

proptest! {
    /// The periodic Laplacian is a discrete divergence: it sums to zero.
    #[test]
    fn periodic_laplacian_sums_to_zero(
        values in proptest::collection::vec(-10.0f64..10.0, 3..128),
        dx in 0.01f64..1.0,
    ) {
        let field = Array1::from(values);
        let lap = laplacian(field.view(), dx, Boundary::Periodic).unwrap();
        let scale = field.iter().map(|v| v.abs()).fold(0.0, f64::max) / (dx * dx);
        prop_assert!(lap.sum().abs() <= 1e-9 * scale.max(1.0) * field.len() as f64,
            "sum = {}", lap.sum());
    }

    /// The periodic stencil commutes with a cyclic shift of the grid.
    #[test]
    fn periodic_laplacian_shift_invariant(
        values in proptest::collection::vec(-5.0f64..5.0, 3..64),
        shift in 0usize..64,
    ) {
        let n = values.len();
        let shift = shift % n;
        let field = Array1::from(values);
        let shifted = Array1::from_shape_fn(n, |i| field[(i + shift) % n]);
        let lap = laplacian(field.view(), 0.1, Boundary::Periodic).unwrap();
        let lap_shifted = laplacian(shifted.view(), 0.1, Boundary::Periodic).unwrap();
        for i in 0..n {
            prop_assert!((lap_shifted[i] - lap[(i + shift) % n]).abs() < 1e-9);
        }
    }

    /// Dirichlet ends are never touched and the interior matches periodic.
    #[test]
    fn dirichlet_interior_matches_periodic(
        values in proptest::collection::vec(-5.0f64..5.0, 3..64),
    ) {
        let n = values.len();
        let field = Array1::from(values);
        let periodic = laplacian(field.view(), 0.2, Boundary::Periodic).unwrap();
        let dirichlet = laplacian(field.view(), 0.2, Boundary::Dirichlet).unwrap();
        prop_assert_eq!(dirichlet[0], 0.0);
        prop_assert_eq!(dirichlet[n - 1], 0.0);
        for i in 1..n - 1 {
            prop_assert_eq!(dirichlet[i], periodic[i]);
        }
    }
}

// ── Memory Kernel Properties ─────────────────────────────────────────

proptest! {
    /// Weights follow exp(-(k+1)γ) and stay positive.
    #[test]
    fn kernel_weights_exponential(gamma in 0.0f64..2.0, depth in 0usize..32) {
        let kernel = MemoryKernel::exponential(gamma, depth).unwrap();
        prop_assert_eq!(kernel.depth(), depth);
        for k in 0..depth {
            let expected = (-((k + 1) as f64) * gamma).exp();
            prop_assert!((kernel.weights()[k] - expected).abs() < 1e-14);
            prop_assert!(kernel.weights()[k] > 0.0);
        }
    }

    /// With t snapshots available and depth ≥ t, only t lags contribute.
    #[test]
    fn kernel_truncates_to_available_lags(
        depth in 1usize..16,
        available in 1usize..16,
        gamma in 0.0f64..1.0,
    ) {
        let kernel = MemoryKernel::exponential(gamma, depth).unwrap();
        let mut window = HistoryWindow::new(depth, 4).unwrap();
        for _ in 0..available {
            window.push(Array1::from_elem(4, 1.0)).unwrap();
        }
        let mut out = Array1::zeros(4);
        let used = kernel.apply_into(&window, &mut out).unwrap();
        let lags = available.min(depth);
        prop_assert_eq!(used, lags);
        let expected: f64 = kernel.weights().iter().take(lags).sum();
        for &v in out.iter() {
            prop_assert!((v - expected).abs() < 1e-12);
        }
    }

    /// The window never holds more than its capacity.
    #[test]
    fn window_bounded(capacity in 1usize..16, pushes in 0usize..64) {
        let mut window = HistoryWindow::new(capacity, 2).unwrap();
        for p in 0..pushes {
            window.push(Array1::from_elem(2, p as f64)).unwrap();
            prop_assert!(window.len() <= capacity);
        }
        prop_assert_eq!(window.len(), pushes.min(capacity));
        if pushes > 0 {
            prop_assert_eq!(window.latest().unwrap()[0], (pushes - 1) as f64);
        }
    }
}

// ── Packet Properties ────────────────────────────────────────────────

proptest! {
    /// |packet| is bounded by the envelope and the envelope by 1.
    #[test]
    fn packet_bounded_by_envelope(
        center in 1.0f64..9.0,
        width in 0.05f64..2.0,
        velocity in -20.0f64..20.0,
    ) {
        let x = Array1::linspace(0.0, 10.0, 101);
        let packet = gaussian_packet(&x, center, width, velocity);
        for (i, &v) in packet.iter().enumerate() {
            let env = gaussian_envelope(x[i], center, width);
            prop_assert!(env <= 1.0);
            prop_assert!(v.abs() <= env + 1e-15);
        }
    }
}
