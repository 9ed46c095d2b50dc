// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Property-Based Tests (proptest) for tcn-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for tcn-types using proptest.
//!
//! Covers: Grid1D construction invariants, TimeAxis step counts,
//! HistoryRecorder shape invariants.

use ndarray::Array1;
use proptest::prelude::*;
use tcn_types::state::{Grid1D, HistoryRecorder, TimeAxis};

// ── Grid1D Construction Invariants ───────────────────────────────────

proptest! {
    /// Coordinate count and spacing match the constructor arguments.
    #[test]
    fn grid_dimensions_match(
        n in 3usize..512,
        length in 0.1f64..100.0,
    ) {
        let grid = Grid1D::new(length, n).unwrap();

        prop_assert_eq!(grid.n, n);
        prop_assert_eq!(grid.x.len(), n);
        prop_assert!(grid.dx > 0.0);
        prop_assert!((grid.dx - length / (n as f64 - 1.0)).abs() < 1e-12);
    }

    /// Grid spans [0, L] with uniform spacing.
    #[test]
    fn grid_uniform_spacing(n in 3usize..256, length in 0.5f64..50.0) {
        let grid = Grid1D::new(length, n).unwrap();
        prop_assert!(grid.x[0].abs() < 1e-12);
        prop_assert!((grid.x[n - 1] - length).abs() < 1e-9);
        for i in 1..n {
            let delta = grid.x[i] - grid.x[i - 1];
            prop_assert!((delta - grid.dx).abs() < 1e-9,
                "Non-uniform spacing at {}: delta={}, dx={}", i, delta, grid.dx);
        }
    }

    /// Grids below three points are always rejected.
    #[test]
    fn grid_rejects_degenerate(n in 0usize..3, length in 0.1f64..10.0) {
        prop_assert!(Grid1D::new(length, n).is_err());
    }
}

// ── TimeAxis Invariants ──────────────────────────────────────────────

proptest! {
    /// An exact multiple of dt gives exactly that many steps.
    #[test]
    fn time_axis_exact_multiple(steps in 1usize..2000, dt_exp in -9i32..-1) {
        let dt = 10f64.powi(dt_exp);
        let axis = TimeAxis::new(steps as f64 * dt, dt).unwrap();
        prop_assert_eq!(axis.n_steps, steps);
    }

    /// The step count never overshoots the duration by a full step.
    #[test]
    fn time_axis_floor(duration in 1e-3f64..10.0, dt in 1e-4f64..1e-3) {
        let axis = TimeAxis::new(duration, dt).unwrap();
        prop_assert!(axis.n_steps >= 1);
        prop_assert!((axis.n_steps as f64 - 1.0) * dt <= duration);
        prop_assert!((axis.n_steps as f64 + 1.0) * dt > duration);
    }
}

// ── HistoryRecorder Invariants ───────────────────────────────────────

proptest! {
    /// Every retained snapshot has exactly N entries and steps stay sorted.
    #[test]
    fn recorder_shape_invariant(
        n in 3usize..64,
        n_steps in 1usize..64,
        stride in 1usize..8,
    ) {
        let mut rec = HistoryRecorder::new(n, n_steps);
        for step in (0..n_steps).step_by(stride) {
            rec.record(step, Array1::from_elem(n, step as f64).view()).unwrap();
        }
        let history = rec.finish();

        prop_assert_eq!(history.n_points(), n);
        prop_assert_eq!(history.len(), (n_steps + stride - 1) / stride);
        for row in history.snapshots().rows() {
            prop_assert_eq!(row.len(), n);
        }
        prop_assert!(history.steps().windows(2).all(|w| w[0] < w[1]));
    }
}
