// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Integrator Contract
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared contract of the time-stepping integrators.

use ndarray::Array1;
use tcn_math::stencil::Boundary;
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::{FieldHistory, FieldSample, Grid1D, TimeAxis};

/// One packet's time evolution over a fixed grid and time axis.
///
/// Implementations are pure: the returned history depends only on the
/// integrator's configuration and the initial field.
pub trait FieldIntegrator {
    type Sample: FieldSample;

    /// Boundary treatment of the spatial stencil.
    fn boundary(&self) -> Boundary;

    fn grid(&self) -> &Grid1D;

    fn time_axis(&self) -> &TimeAxis;

    /// Evolve `initial` (step 0) through steps 1..S-1.
    fn integrate(&self, initial: &Array1<Self::Sample>) -> TcnResult<FieldHistory<Self::Sample>>;
}

/// Which time steps of a run are retained for display.
/// Step 0 and the final step are always kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPolicy {
    stride: usize,
}

impl SamplingPolicy {
    pub fn every(stride: usize) -> TcnResult<Self> {
        if stride == 0 {
            return Err(TcnError::PreconditionViolation(
                "sampling stride must be >= 1".to_string(),
            ));
        }
        Ok(SamplingPolicy { stride })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn retains(&self, step: usize, n_steps: usize) -> bool {
        step % self.stride == 0 || step + 1 == n_steps
    }

    pub fn retained_steps(&self, n_steps: usize) -> Vec<usize> {
        (0..n_steps).filter(|&s| self.retains(s, n_steps)).collect()
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        SamplingPolicy { stride: 1 }
    }
}

/// Reject an initial field that does not fit the grid or is not finite.
pub(crate) fn validate_initial<T: FieldSample>(initial: &Array1<T>, grid: &Grid1D) -> TcnResult<()> {
    if initial.len() != grid.n {
        return Err(TcnError::PreconditionViolation(format!(
            "initial field has {} points, grid has {}",
            initial.len(),
            grid.n
        )));
    }
    if let Some(i) = initial.iter().position(|v| !v.finite()) {
        return Err(TcnError::PreconditionViolation(format!(
            "initial field is non-finite at index {i}"
        )));
    }
    Ok(())
}
