//! Exponentially decaying memory kernel.
//!
//! weight[k] = exp(-(k+1)·γ), k = 0..depth-1, applied to the field's own
//! last `depth` snapshots:
//!   memory[i] = Σ_{k=1..depth} weight[k-1] · f(t-k)[i]
//! Lags that reach before step 0 contribute nothing.

use crate::history::HistoryWindow;
use ndarray::{Array1, Zip};
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::FieldSample;

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryKernel {
    weights: Array1<f64>,
}

impl MemoryKernel {
    pub fn exponential(gamma: f64, depth: usize) -> TcnResult<Self> {
        if !gamma.is_finite() {
            return Err(TcnError::PreconditionViolation(format!(
                "memory kernel gamma must be finite, got {gamma}"
            )));
        }
        let weights = Array1::from_shape_fn(depth, |k| (-((k + 1) as f64) * gamma).exp());
        Self::from_weights(weights)
    }

    pub fn from_weights(weights: Array1<f64>) -> TcnResult<Self> {
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(TcnError::PreconditionViolation(
                "memory kernel weights must be finite".to_string(),
            ));
        }
        Ok(MemoryKernel { weights })
    }

    pub fn depth(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Weighted sum over the snapshots held in `window`, newest first,
    /// written into `out`. Returns how many lags contributed.
    pub fn apply_into<T: FieldSample>(
        &self,
        window: &HistoryWindow<T>,
        out: &mut Array1<T>,
    ) -> TcnResult<usize> {
        if out.len() != window.n_points() {
            return Err(TcnError::PreconditionViolation(format!(
                "memory output length {} does not match window fields of {}",
                out.len(),
                window.n_points()
            )));
        }
        out.fill(T::ZERO);
        let mut used = 0;
        for (lag, &weight) in (1..).zip(self.weights.iter()) {
            // Lags before step 0 are not in the window yet.
            let Some(snapshot) = window.lagged(lag) else {
                break;
            };
            Zip::from(&mut *out)
                .and(snapshot)
                .for_each(|o, &f| *o = *o + f * weight);
            used += 1;
        }
        Ok(used)
    }
}
