// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Stability Check
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Post-run growth check for conditionally stable schemes.
//!
//! Neither integrator enforces its stability bound. After a run the peak
//! magnitude of every retained snapshot is compared with the step-0 peak;
//! excessive growth or non-finite samples are reported as a warning, never
//! as an error.

use log::warn;
use tcn_types::state::{FieldHistory, FieldSample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    /// max_i |f[0][i]|
    pub initial_peak: f64,
    /// max over retained steps of max_i |f[t][i]|, non-finite samples ignored.
    pub max_peak: f64,
    /// Step at which `max_peak` occurred.
    pub peak_step: usize,
    pub growth_ratio: f64,
    pub all_finite: bool,
    pub unstable: bool,
}

/// Compare peak growth against `growth_limit` and warn under `label`.
pub fn check_growth<T: FieldSample>(
    history: &FieldHistory<T>,
    growth_limit: f64,
    label: &str,
) -> StabilityReport {
    let mut all_finite = true;
    let mut peaks = Vec::with_capacity(history.len());
    for row in history.snapshots().rows() {
        let mut peak = 0.0_f64;
        for &v in row.iter() {
            if v.finite() {
                peak = peak.max(v.intensity().sqrt());
            } else {
                all_finite = false;
            }
        }
        peaks.push(peak);
    }

    let initial_peak = peaks.first().copied().unwrap_or(0.0);
    let (peak_row, max_peak) = peaks
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0_f64), |acc, (r, p)| if p > acc.1 { (r, p) } else { acc });
    let peak_step = history.steps().get(peak_row).copied().unwrap_or(0);

    let growth_ratio = if initial_peak > 0.0 {
        max_peak / initial_peak
    } else if max_peak > 0.0 {
        f64::INFINITY
    } else {
        1.0
    };
    let unstable = !all_finite || growth_ratio > growth_limit;

    if unstable {
        warn!(
            "{label}: possible numerical instability, peak grew {growth_ratio:.3e}x \
             (limit {growth_limit}) by step {peak_step}, all finite: {all_finite}"
        );
    }

    StabilityReport {
        initial_peak,
        max_peak,
        peak_step,
        growth_ratio,
        all_finite,
        unstable,
    }
}
