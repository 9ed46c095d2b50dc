// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Collision Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-packet collision runs.
//!
//! Memory feedback: every packet is integrated on its own (optionally one
//! rayon task per packet) and the histories are summed afterwards.
//! Leapfrog: the packets are summed first and evolved as one real field.

use crate::integrator::{FieldIntegrator, SamplingPolicy};
use crate::leapfrog::LeapfrogWaveIntegrator;
use crate::memory_feedback::MemoryFeedbackIntegrator;
use crate::stability::{check_growth, StabilityReport};
use crate::superposition::superpose;
use log::info;
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use tcn_math::packet::{complex_field, real_field};
use tcn_types::config::{IntegratorKind, SimulationConfig};
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::{intensity_centroid, FieldHistory, Grid1D, TimeAxis};

/// Everything a results sink needs to display a run.
#[derive(Debug, Clone)]
pub struct CollisionReport {
    pub name: String,
    pub integrator: IntegratorKind,
    /// Spatial coordinate of every column.
    pub x: Array1<f64>,
    /// Time-step index of every row.
    pub steps: Vec<usize>,
    /// Physical time of every row.
    pub times: Array1<f64>,
    /// |f|² per packet; empty for leapfrog runs, which evolve only the sum.
    pub packet_intensity: Vec<Array2<f64>>,
    /// |Σ f|² of the superposed packets.
    pub combined_intensity: Array2<f64>,
    /// Steps requested for preview, all present in `steps`.
    pub snapshot_indices: Vec<usize>,
    /// One entry per integrated field.
    pub stability: Vec<StabilityReport>,
}

impl CollisionReport {
    fn row_of(&self, step: usize) -> Option<usize> {
        self.steps.binary_search(&step).ok()
    }

    /// Combined intensity at `step`.
    pub fn snapshot(&self, step: usize) -> Option<ArrayView1<'_, f64>> {
        self.row_of(step).map(|r| self.combined_intensity.row(r))
    }

    pub fn packet_snapshot(&self, packet: usize, step: usize) -> Option<ArrayView1<'_, f64>> {
        let table = self.packet_intensity.get(packet)?;
        self.row_of(step).map(|r| table.row(r))
    }

    /// Combined intensity at every requested snapshot index.
    pub fn previews(&self) -> Vec<(usize, ArrayView1<'_, f64>)> {
        self.snapshot_indices
            .iter()
            .filter_map(|&step| self.snapshot(step).map(|row| (step, row)))
            .collect()
    }

    pub fn packet_centroid(&self, packet: usize) -> TcnResult<Array1<f64>> {
        let table = self.packet_intensity.get(packet).ok_or_else(|| {
            TcnError::PreconditionViolation(format!(
                "report holds {} packet tables, asked for {packet}",
                self.packet_intensity.len()
            ))
        })?;
        intensity_centroid(table, &self.x)
    }

    pub fn is_stable(&self) -> bool {
        self.stability.iter().all(|r| !r.unstable)
    }
}

/// Integrate each initial field with `integrator`, one rayon task per field
/// when `parallel` is set.
pub fn integrate_packets<I>(
    integrator: &I,
    initials: &[Array1<I::Sample>],
    parallel: bool,
) -> TcnResult<Vec<FieldHistory<I::Sample>>>
where
    I: FieldIntegrator + Sync,
{
    if parallel {
        initials
            .par_iter()
            .map(|initial| integrator.integrate(initial))
            .collect()
    } else {
        initials
            .iter()
            .map(|initial| integrator.integrate(initial))
            .collect()
    }
}

/// Run the collision described by `config`.
///
/// All preconditions (grid, time axis, physics, packets, snapshot indices)
/// are checked before any integration starts.
pub fn run_collision(config: &SimulationConfig) -> TcnResult<CollisionReport> {
    config.validate()?;
    let grid = config.create_grid()?;
    let time = config.create_time_axis()?;
    let sampling = SamplingPolicy::every(config.active_stride())?;

    let retained = sampling.retained_steps(time.n_steps);
    for &step in &config.sampling.snapshot_indices {
        if retained.binary_search(&step).is_err() {
            return Err(TcnError::PreconditionViolation(format!(
                "snapshot index {step} is not retained (S={}, stride={})",
                time.n_steps,
                sampling.stride()
            )));
        }
    }

    info!(
        "{}: {} packet(s), {:?}, N={}, S={}",
        config.name,
        config.packets.len(),
        config.integrator,
        grid.n,
        time.n_steps
    );

    let report = match config.integrator {
        IntegratorKind::MemoryFeedback => run_memory_feedback(config, grid, time, sampling)?,
        IntegratorKind::Leapfrog => run_leapfrog(config, grid, time)?,
    };

    info!(
        "{}: finished, {} snapshots retained, stable: {}",
        report.name,
        report.steps.len(),
        report.is_stable()
    );
    Ok(report)
}

fn run_memory_feedback(
    config: &SimulationConfig,
    grid: Grid1D,
    time: TimeAxis,
    sampling: SamplingPolicy,
) -> TcnResult<CollisionReport> {
    let initials = config
        .packets
        .iter()
        .map(|p| complex_field(&grid.x, p))
        .collect::<TcnResult<Vec<_>>>()?;
    let integrator = MemoryFeedbackIntegrator::new(grid, time, config.physics, sampling)?;

    let histories = integrate_packets(&integrator, &initials, config.parallel_packets)?;
    let refs: Vec<&FieldHistory<_>> = histories.iter().collect();
    let combined = superpose(&refs)?;

    let stability = histories
        .iter()
        .enumerate()
        .map(|(k, h)| {
            check_growth(
                h,
                config.stability.growth_limit,
                &format!("{} packet {k}", config.name),
            )
        })
        .collect();

    Ok(CollisionReport {
        name: config.name.clone(),
        integrator: IntegratorKind::MemoryFeedback,
        x: integrator.grid().x.clone(),
        steps: combined.steps().to_vec(),
        times: time.times(combined.steps()),
        packet_intensity: histories.iter().map(|h| h.intensity()).collect(),
        combined_intensity: combined.intensity(),
        snapshot_indices: config.sampling.snapshot_indices.clone(),
        stability,
    })
}

fn run_leapfrog(
    config: &SimulationConfig,
    grid: Grid1D,
    time: TimeAxis,
) -> TcnResult<CollisionReport> {
    let mut initial = Array1::<f64>::zeros(grid.n);
    for packet in &config.packets {
        initial += &real_field(&grid.x, packet)?;
    }
    let integrator = LeapfrogWaveIntegrator::from_config(grid, time, &config.leapfrog)?;
    let history = integrator.integrate(&initial)?;
    let stability = check_growth(
        &history,
        config.stability.growth_limit,
        &format!("{} leapfrog", config.name),
    );

    Ok(CollisionReport {
        name: config.name.clone(),
        integrator: IntegratorKind::Leapfrog,
        x: integrator.grid().x.clone(),
        steps: history.steps().to_vec(),
        times: time.times(history.steps()),
        packet_intensity: Vec::new(),
        combined_intensity: history.intensity(),
        snapshot_indices: config.sampling.snapshot_indices.clone(),
        stability: vec![stability],
    })
}
