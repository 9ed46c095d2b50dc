// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Superposition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Elementwise superposition of packet histories.
//!
//! Packets evolve independently; the combined field never feeds back into
//! either packet. It exists only for display of the collision profile.

use ndarray::{Array2, Zip};
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::{FieldHistory, FieldSample};

/// combined[t][i] = Σ_h h[t][i] over histories of identical shape.
pub fn superpose<T: FieldSample>(histories: &[&FieldHistory<T>]) -> TcnResult<FieldHistory<T>> {
    let (first, rest) = histories.split_first().ok_or_else(|| {
        TcnError::PreconditionViolation("superposition requires at least one history".to_string())
    })?;

    for (k, other) in rest.iter().enumerate() {
        if other.shape() != first.shape() {
            return Err(TcnError::PreconditionViolation(format!(
                "history {} has shape {:?}, expected {:?}",
                k + 1,
                other.shape(),
                first.shape()
            )));
        }
        if other.steps() != first.steps() || other.n_steps() != first.n_steps() {
            return Err(TcnError::PreconditionViolation(format!(
                "history {} retains different time steps than history 0",
                k + 1
            )));
        }
    }

    let mut sum = first.snapshots().clone();
    for other in rest {
        Zip::from(&mut sum)
            .and(other.snapshots())
            .for_each(|s, &v| *s = *s + v);
    }
    FieldHistory::from_parts(first.steps().to_vec(), sum, first.n_steps())
}

/// |combined[t][i]|².
pub fn combined_intensity<T: FieldSample>(histories: &[&FieldHistory<T>]) -> TcnResult<Array2<f64>> {
    Ok(superpose(histories)?.intensity())
}
