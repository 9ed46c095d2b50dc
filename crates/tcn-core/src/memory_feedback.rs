// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Memory-Feedback Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Explicit memory-feedback evolution of a complex wave packet.
//!
//! With f the field at step t-1:
//!   next = f + dt · ( -i·ħ·(-ħ²/2m)·lap(f)      dispersion, periodic stencil
//!                     + Σ_k w[k-1]·f(t-k)      memory kernel
//!                     + λ·(Σ_i |f_i|²)·f       self-coherence feedback
//!                     - i·ħ·μ·f )              damping
//! The intensity sum is not weighted by dx. The scheme is forward Euler and
//! only conditionally stable; no step-size control is applied.

use crate::integrator::{validate_initial, FieldIntegrator, SamplingPolicy};
use log::{debug, info};
use ndarray::{Array1, Zip};
use num_complex::Complex64;
use tcn_math::history::HistoryWindow;
use tcn_math::kernel::MemoryKernel;
use tcn_math::stencil::{laplacian_into, Boundary};
use tcn_types::config::PhysicsParameters;
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::{FieldHistory, FieldSample, Grid1D, HistoryRecorder, TimeAxis};

/// Σ_i conj(f_i)·f_i, the instantaneous intensity driving the feedback.
pub fn self_coherence_intensity(field: &Array1<Complex64>) -> f64 {
    field.iter().map(|z| z.norm_sqr()).sum()
}

#[derive(Debug, Clone)]
pub struct MemoryFeedbackIntegrator {
    grid: Grid1D,
    time: TimeAxis,
    params: PhysicsParameters,
    kernel: MemoryKernel,
    sampling: SamplingPolicy,
}

impl MemoryFeedbackIntegrator {
    /// Build with the exponential kernel w[k] = exp(-(k+1)·γ).
    pub fn new(
        grid: Grid1D,
        time: TimeAxis,
        params: PhysicsParameters,
        sampling: SamplingPolicy,
    ) -> TcnResult<Self> {
        params.validate()?;
        let kernel = MemoryKernel::exponential(params.gamma, params.memory_depth)?;
        Self::with_kernel(grid, time, params, kernel, sampling)
    }

    /// Build with an explicit kernel; its depth must equal `memory_depth`.
    pub fn with_kernel(
        grid: Grid1D,
        time: TimeAxis,
        params: PhysicsParameters,
        kernel: MemoryKernel,
        sampling: SamplingPolicy,
    ) -> TcnResult<Self> {
        params.validate()?;
        if kernel.depth() != params.memory_depth {
            return Err(TcnError::PreconditionViolation(format!(
                "memory kernel depth {} does not match memory_depth {}",
                kernel.depth(),
                params.memory_depth
            )));
        }
        Ok(Self {
            grid,
            time,
            params,
            kernel,
            sampling,
        })
    }

    pub fn params(&self) -> &PhysicsParameters {
        &self.params
    }

    pub fn kernel(&self) -> &MemoryKernel {
        &self.kernel
    }

    pub fn sampling(&self) -> SamplingPolicy {
        self.sampling
    }

    /// -i·ħ·(-ħ²/2m), the factor in front of the Laplacian.
    pub fn dispersion_coefficient(&self) -> Complex64 {
        let hbar = self.params.hbar;
        Complex64::new(0.0, -hbar) * (-(hbar * hbar) / (2.0 * self.params.mass))
    }

    /// Next field from the window, whose latest entry is f(t-1).
    /// `lap` and `memory` are scratch buffers of grid length.
    fn advance(
        &self,
        window: &HistoryWindow<Complex64>,
        lap: &mut Array1<Complex64>,
        memory: &mut Array1<Complex64>,
    ) -> TcnResult<Array1<Complex64>> {
        let f = window.latest().ok_or_else(|| {
            TcnError::PreconditionViolation(
                "memory-feedback step requires a previous snapshot".to_string(),
            )
        })?;

        laplacian_into(f.view(), self.grid.dx, Boundary::Periodic, lap)?;
        self.kernel.apply_into(window, memory)?;

        let dt = self.time.dt;
        let dispersion = self.dispersion_coefficient();
        let feedback = self.params.lambda * self_coherence_intensity(f);
        let damping = Complex64::new(0.0, -self.params.hbar * self.params.mu);

        Ok(Zip::from(f)
            .and(&*lap)
            .and(&*memory)
            .map_collect(|&fi, &li, &mi| {
                fi + (dispersion * li + mi + fi * feedback + damping * fi) * dt
            }))
    }
}

impl FieldIntegrator for MemoryFeedbackIntegrator {
    type Sample = Complex64;

    fn boundary(&self) -> Boundary {
        Boundary::Periodic
    }

    fn grid(&self) -> &Grid1D {
        &self.grid
    }

    fn time_axis(&self) -> &TimeAxis {
        &self.time
    }

    fn integrate(&self, initial: &Array1<Complex64>) -> TcnResult<FieldHistory<Complex64>> {
        validate_initial(initial, &self.grid)?;

        let n = self.grid.n;
        let n_steps = self.time.n_steps;
        let depth = self.kernel.depth();
        info!(
            "memory-feedback run: N={n}, S={n_steps}, dt={}, depth={depth}, stride={}",
            self.time.dt,
            self.sampling.stride()
        );
        if depth > 1 {
            debug!(
                "memory kernel sees a truncated history for the first {} steps",
                (depth - 1).min(n_steps.saturating_sub(1))
            );
        }

        // The window always holds f(t-1), even when the kernel is empty.
        let mut window = HistoryWindow::new(depth.max(1), n)?;
        let mut recorder = HistoryRecorder::new(n, n_steps);
        recorder.record(0, initial.view())?;
        window.push(initial.clone())?;

        let mut lap = Array1::from_elem(n, <Complex64 as FieldSample>::ZERO);
        let mut memory = Array1::from_elem(n, <Complex64 as FieldSample>::ZERO);
        for t in 1..n_steps {
            let next = self.advance(&window, &mut lap, &mut memory)?;
            if self.sampling.retains(t, n_steps) {
                recorder.record(t, next.view())?;
            }
            window.push(next)?;
        }

        Ok(recorder.finish())
    }
}
