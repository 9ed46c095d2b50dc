// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Leapfrog Wave Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Second-order leapfrog scheme for the damped real wave equation.
//!
//!   next = 2·cur - prev + c²dt²·lap(cur) - damping·(cur - prev)
//!
//! evaluated on interior points only; the two end points keep their step-0
//! value for the whole run. The run starts at rest (prev = cur = initial).

use crate::integrator::{validate_initial, FieldIntegrator, SamplingPolicy};
use log::info;
use ndarray::{s, Array1, Zip};
use tcn_math::stencil::{laplacian_into, Boundary};
use tcn_types::config::LeapfrogConfig;
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::{FieldHistory, Grid1D, HistoryRecorder, TimeAxis};

#[derive(Debug, Clone)]
pub struct LeapfrogWaveIntegrator {
    grid: Grid1D,
    time: TimeAxis,
    wave_speed: f64,
    damping: f64,
    sampling: SamplingPolicy,
}

impl LeapfrogWaveIntegrator {
    pub fn new(
        grid: Grid1D,
        time: TimeAxis,
        wave_speed: f64,
        damping: f64,
        sampling: SamplingPolicy,
    ) -> TcnResult<Self> {
        if !wave_speed.is_finite() {
            return Err(TcnError::PreconditionViolation(format!(
                "leapfrog wave speed must be finite, got {wave_speed}"
            )));
        }
        if !damping.is_finite() {
            return Err(TcnError::PreconditionViolation(format!(
                "leapfrog damping must be finite, got {damping}"
            )));
        }
        Ok(Self {
            grid,
            time,
            wave_speed,
            damping,
            sampling,
        })
    }

    pub fn from_config(grid: Grid1D, time: TimeAxis, config: &LeapfrogConfig) -> TcnResult<Self> {
        let sampling = SamplingPolicy::every(config.sample_stride)?;
        Self::new(grid, time, config.wave_speed, config.damping, sampling)
    }

    /// c·dt/dx. The scheme is stable for |courant| <= 1.
    pub fn courant_number(&self) -> f64 {
        self.wave_speed * self.time.dt / self.grid.dx
    }

    pub fn sampling(&self) -> SamplingPolicy {
        self.sampling
    }
}

impl FieldIntegrator for LeapfrogWaveIntegrator {
    type Sample = f64;

    fn boundary(&self) -> Boundary {
        Boundary::Dirichlet
    }

    fn grid(&self) -> &Grid1D {
        &self.grid
    }

    fn time_axis(&self) -> &TimeAxis {
        &self.time
    }

    fn integrate(&self, initial: &Array1<f64>) -> TcnResult<FieldHistory<f64>> {
        validate_initial(initial, &self.grid)?;

        let n = self.grid.n;
        let n_steps = self.time.n_steps;
        let c2dt2 = (self.wave_speed * self.time.dt).powi(2);
        let damping = self.damping;
        info!(
            "leapfrog run: N={n}, S={n_steps}, courant={:.3e}, stride={}",
            self.courant_number(),
            self.sampling.stride()
        );

        let mut recorder = HistoryRecorder::new(n, n_steps);
        recorder.record(0, initial.view())?;

        let mut previous = initial.clone();
        let mut current = initial.clone();
        let mut lap = Array1::zeros(n);
        for t in 1..n_steps {
            laplacian_into(current.view(), self.grid.dx, Boundary::Dirichlet, &mut lap)?;

            // End points are copied from `current` and never written.
            let mut next = current.clone();
            Zip::from(next.slice_mut(s![1..n - 1]))
                .and(current.slice(s![1..n - 1]))
                .and(previous.slice(s![1..n - 1]))
                .and(lap.slice(s![1..n - 1]))
                .for_each(|nx, &cur, &prev, &l| {
                    *nx = 2.0 * cur - prev + c2dt2 * l - damping * (cur - prev);
                });

            if self.sampling.retains(t, n_steps) {
                recorder.record(t, next.view())?;
            }
            previous = std::mem::replace(&mut current, next);
        }

        Ok(recorder.finish())
    }
}
