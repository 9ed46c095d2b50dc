// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{MIN_GRID_POINTS, STEP_COUNT_TOLERANCE};
use crate::error::{TcnError, TcnResult};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use num_complex::Complex64;
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Uniform 1D grid with precomputed coordinates.
/// x = linspace(0, L, N), dx = L / (N - 1).
#[derive(Debug, Clone)]
pub struct Grid1D {
    pub n: usize,
    pub length: f64,
    pub dx: f64,
    pub x: Array1<f64>,
}

impl Grid1D {
    pub fn new(length: f64, n: usize) -> TcnResult<Self> {
        if n < MIN_GRID_POINTS {
            return Err(TcnError::PreconditionViolation(format!(
                "grid requires at least {MIN_GRID_POINTS} points for the Laplacian stencil, got {n}"
            )));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(TcnError::PreconditionViolation(format!(
                "grid length must be finite and > 0, got {length}"
            )));
        }
        let dx = length / (n as f64 - 1.0);
        if !dx.is_finite() || dx <= 0.0 {
            return Err(TcnError::PreconditionViolation(format!(
                "grid spacing must be finite and > 0, got {dx}"
            )));
        }
        let x = Array1::linspace(0.0, length, n);
        Ok(Grid1D { n, length, dx, x })
    }
}

/// Fixed-step time axis. S = floor(T / dt).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub duration: f64,
    pub dt: f64,
    pub n_steps: usize,
}

impl TimeAxis {
    pub fn new(duration: f64, dt: f64) -> TcnResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(TcnError::PreconditionViolation(format!(
                "time step dt must be finite and > 0, got {dt}"
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TcnError::PreconditionViolation(format!(
                "duration must be finite and > 0, got {duration}"
            )));
        }
        let ratio = duration / dt;
        let steps = (ratio + STEP_COUNT_TOLERANCE * ratio.max(1.0)).floor();
        if !steps.is_finite() || steps < 1.0 || steps > usize::MAX as f64 {
            return Err(TcnError::PreconditionViolation(format!(
                "time axis must contain at least one step, got T={duration}, dt={dt}"
            )));
        }
        Ok(TimeAxis {
            duration,
            dt,
            n_steps: steps as usize,
        })
    }

    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    /// Physical times of the given step indices.
    pub fn times(&self, steps: &[usize]) -> Array1<f64> {
        steps.iter().map(|&s| self.time_at(s)).collect()
    }
}

/// Scalar sample type a field can carry.
pub trait FieldSample:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
    const ZERO: Self;

    /// Squared magnitude |v|².
    fn intensity(self) -> f64;

    fn finite(self) -> bool;
}

impl FieldSample for f64 {
    const ZERO: Self = 0.0;

    fn intensity(self) -> f64 {
        self * self
    }

    fn finite(self) -> bool {
        self.is_finite()
    }
}

impl FieldSample for Complex64 {
    const ZERO: Self = Complex64::new(0.0, 0.0);

    fn intensity(self) -> f64 {
        self.norm_sqr()
    }

    fn finite(self) -> bool {
        self.is_finite()
    }
}

/// Retained snapshots of one field over a run.
///
/// Row r of `snapshots` is the field at time step `steps[r]`; `n_steps` is
/// the total step count S of the run, whether or not every step is retained.
#[derive(Debug, Clone)]
pub struct FieldHistory<T> {
    steps: Vec<usize>,
    snapshots: Array2<T>,
    n_steps: usize,
}

impl<T: FieldSample> FieldHistory<T> {
    /// Assemble a history from already computed rows.
    pub fn from_parts(steps: Vec<usize>, snapshots: Array2<T>, n_steps: usize) -> TcnResult<Self> {
        if steps.len() != snapshots.nrows() {
            return Err(TcnError::PreconditionViolation(format!(
                "history has {} step labels for {} snapshots",
                steps.len(),
                snapshots.nrows()
            )));
        }
        if steps.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TcnError::PreconditionViolation(
                "history step labels must be strictly increasing".to_string(),
            ));
        }
        if let Some(&last) = steps.last() {
            if last >= n_steps {
                return Err(TcnError::PreconditionViolation(format!(
                    "history step {last} is outside a run of {n_steps} steps"
                )));
            }
        }
        Ok(FieldHistory {
            steps,
            snapshots,
            n_steps,
        })
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn snapshots(&self) -> &Array2<T> {
        &self.snapshots
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn n_points(&self) -> usize {
        self.snapshots.ncols()
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// (retained snapshots, grid points)
    pub fn shape(&self) -> (usize, usize) {
        self.snapshots.dim()
    }

    /// Snapshot at time step `step`, if that step was retained.
    pub fn snapshot(&self, step: usize) -> Option<ArrayView1<'_, T>> {
        self.steps
            .binary_search(&step)
            .ok()
            .map(|row| self.snapshots.row(row))
    }

    /// |f[t][i]|² for every retained snapshot.
    pub fn intensity(&self) -> Array2<f64> {
        self.snapshots.mapv(|v| v.intensity())
    }

    /// Σ_i |f[t][i]|² per retained snapshot.
    pub fn total_intensity(&self) -> Array1<f64> {
        self.intensity().sum_axis(Axis(1))
    }

    /// Intensity-weighted mean coordinate per retained snapshot.
    pub fn centroid(&self, x: &Array1<f64>) -> TcnResult<Array1<f64>> {
        intensity_centroid(&self.intensity(), x)
    }
}

/// Σ x·I / Σ I per row of an intensity table.
/// Rows with zero total intensity have no centroid and yield NaN.
pub fn intensity_centroid(intensity: &Array2<f64>, x: &Array1<f64>) -> TcnResult<Array1<f64>> {
    if x.len() != intensity.ncols() {
        return Err(TcnError::PreconditionViolation(format!(
            "centroid coordinates have length {}, intensity rows have {} points",
            x.len(),
            intensity.ncols()
        )));
    }
    Ok(intensity
        .rows()
        .into_iter()
        .map(|row| {
            let total = row.sum();
            if total > 0.0 {
                row.dot(x) / total
            } else {
                f64::NAN
            }
        })
        .collect())
}

/// Append-only builder for a [`FieldHistory`].
#[derive(Debug)]
pub struct HistoryRecorder<T> {
    steps: Vec<usize>,
    snapshots: Array2<T>,
    n_steps: usize,
}

impl<T: FieldSample> HistoryRecorder<T> {
    pub fn new(n_points: usize, n_steps: usize) -> Self {
        HistoryRecorder {
            steps: Vec::new(),
            snapshots: Array2::from_elem((0, n_points), T::ZERO),
            n_steps,
        }
    }

    /// Append the field at `step`. Steps must arrive in increasing order.
    pub fn record(&mut self, step: usize, field: ArrayView1<'_, T>) -> TcnResult<()> {
        if field.len() != self.snapshots.ncols() {
            return Err(TcnError::PreconditionViolation(format!(
                "snapshot has {} points, history expects {}",
                field.len(),
                self.snapshots.ncols()
            )));
        }
        if step >= self.n_steps {
            return Err(TcnError::PreconditionViolation(format!(
                "step {step} is outside a run of {} steps",
                self.n_steps
            )));
        }
        if let Some(&last) = self.steps.last() {
            if step <= last {
                return Err(TcnError::PreconditionViolation(format!(
                    "step {step} recorded after step {last}"
                )));
            }
        }
        self.snapshots
            .push_row(field)
            .map_err(|e| TcnError::PreconditionViolation(format!("snapshot append failed: {e}")))?;
        self.steps.push(step);
        Ok(())
    }

    pub fn finish(self) -> FieldHistory<T> {
        FieldHistory {
            steps: self.steps,
            snapshots: self.snapshots,
            n_steps: self.n_steps,
        }
    }
}
