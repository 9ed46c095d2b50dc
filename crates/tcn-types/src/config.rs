// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_GROWTH_LIMIT, DEFAULT_SAMPLE_STRIDE, HBAR_NORMALIZED, MASS_NORMALIZED,
};
use crate::error::{TcnError, TcnResult};
use crate::state::{Grid1D, TimeAxis};
use serde::{Deserialize, Serialize};

/// Top-level run configuration.
/// Maps 1:1 to the JSON files under `configs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub name: String,
    pub grid: GridConfig,
    pub time: TimeConfig,
    pub physics: PhysicsParameters,
    pub packets: Vec<PacketConfig>,
    #[serde(default)]
    pub integrator: IntegratorKind,
    #[serde(default)]
    pub leapfrog: LeapfrogConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub stability: StabilityConfig,
    /// Integrate independent packets on the rayon pool.
    #[serde(default = "default_parallel_packets")]
    pub parallel_packets: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Domain length L.
    pub length: f64,
    /// Point count N.
    pub points: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Total duration T.
    pub duration: f64,
    pub dt: f64,
}

/// Constants of the memory-feedback evolution law, shared by every packet
/// of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParameters {
    /// Packet mass m.
    pub mass: f64,
    /// Planck constant ħ.
    pub hbar: f64,
    /// Memory-feedback strength γ (kernel decay rate).
    pub gamma: f64,
    /// Self-coherence strength λ.
    pub lambda: f64,
    /// Damping μ.
    pub mu: f64,
    /// Number of past snapshots the memory term reaches back.
    pub memory_depth: usize,
}

impl PhysicsParameters {
    pub fn validate(&self) -> TcnResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(TcnError::PreconditionViolation(format!(
                "mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        for (name, value) in [
            ("hbar", self.hbar),
            ("gamma", self.gamma),
            ("lambda", self.lambda),
            ("mu", self.mu),
        ] {
            if !value.is_finite() {
                return Err(TcnError::PreconditionViolation(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        PhysicsParameters {
            mass: MASS_NORMALIZED,
            hbar: HBAR_NORMALIZED,
            gamma: 0.03,
            lambda: 0.01,
            mu: 0.05,
            memory_depth: 10,
        }
    }
}

/// Carrier wave under the Gaussian envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    /// cos(v·(x − c)): real, standing superposition of ±v.
    #[default]
    Cosine,
    /// exp(i·v·(x − c)): complex, carries net momentum v.
    Travelling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacketConfig {
    pub center: f64,
    pub width: f64,
    pub velocity: f64,
    #[serde(default)]
    pub carrier: Carrier,
}

impl PacketConfig {
    pub fn validate(&self) -> TcnResult<()> {
        if !self.center.is_finite() || !self.velocity.is_finite() {
            return Err(TcnError::ConfigError(format!(
                "packet center and velocity must be finite, got center={}, velocity={}",
                self.center, self.velocity
            )));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(TcnError::ConfigError(format!(
                "packet width must be finite and > 0, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[default]
    MemoryFeedback,
    Leapfrog,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeapfrogConfig {
    #[serde(default = "default_wave_speed")]
    pub wave_speed: f64,
    #[serde(default = "default_leapfrog_damping")]
    pub damping: f64,
    #[serde(default = "default_leapfrog_stride")]
    pub sample_stride: usize,
}

impl Default for LeapfrogConfig {
    fn default() -> Self {
        LeapfrogConfig {
            wave_speed: default_wave_speed(),
            damping: default_leapfrog_damping(),
            sample_stride: default_leapfrog_stride(),
        }
    }
}

/// Which steps of a memory-feedback run are kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Keep every `stride`-th step (1 = full history).
    #[serde(default = "default_sampling_stride")]
    pub stride: usize,
    /// Time-step indices to hand to the preview.
    #[serde(default)]
    pub snapshot_indices: Vec<usize>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            stride: default_sampling_stride(),
            snapshot_indices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityConfig {
    #[serde(default = "default_growth_limit")]
    pub growth_limit: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        StabilityConfig {
            growth_limit: default_growth_limit(),
        }
    }
}

fn default_parallel_packets() -> bool {
    true
}
fn default_wave_speed() -> f64 {
    1.0
}
fn default_leapfrog_damping() -> f64 {
    0.01
}
fn default_leapfrog_stride() -> usize {
    DEFAULT_SAMPLE_STRIDE
}
fn default_sampling_stride() -> usize {
    1
}
fn default_growth_limit() -> f64 {
    DEFAULT_GROWTH_LIMIT
}

impl Default for SimulationConfig {
    /// Two-packet head-on collision on a 10-unit grid.
    fn default() -> Self {
        SimulationConfig {
            name: "TCN-Collision".to_string(),
            grid: GridConfig {
                length: 10.0,
                points: 201,
            },
            time: TimeConfig {
                duration: 150e-6,
                dt: 1e-6,
            },
            physics: PhysicsParameters::default(),
            packets: vec![
                PacketConfig {
                    center: 2.5,
                    width: 0.3,
                    velocity: 5.0,
                    carrier: Carrier::Cosine,
                },
                PacketConfig {
                    center: 7.5,
                    width: 0.3,
                    velocity: -5.0,
                    carrier: Carrier::Cosine,
                },
            ],
            integrator: IntegratorKind::MemoryFeedback,
            leapfrog: LeapfrogConfig::default(),
            sampling: SamplingConfig {
                stride: 1,
                snapshot_indices: vec![0, 45, 75, 149],
            },
            stability: StabilityConfig::default(),
            parallel_packets: true,
        }
    }
}

impl SimulationConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> TcnResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter that does not need a grid or time axis to judge.
    pub fn validate(&self) -> TcnResult<()> {
        self.physics.validate()?;
        if self.packets.is_empty() {
            return Err(TcnError::ConfigError(
                "at least one packet must be configured".to_string(),
            ));
        }
        for packet in &self.packets {
            packet.validate()?;
        }
        if self.sampling.stride == 0 || self.leapfrog.sample_stride == 0 {
            return Err(TcnError::ConfigError(
                "sampling strides must be >= 1".to_string(),
            ));
        }
        if !self.leapfrog.wave_speed.is_finite() || !self.leapfrog.damping.is_finite() {
            return Err(TcnError::ConfigError(format!(
                "leapfrog wave_speed and damping must be finite, got {} and {}",
                self.leapfrog.wave_speed, self.leapfrog.damping
            )));
        }
        if !self.stability.growth_limit.is_finite() || self.stability.growth_limit <= 0.0 {
            return Err(TcnError::ConfigError(format!(
                "stability growth_limit must be finite and > 0, got {}",
                self.stability.growth_limit
            )));
        }
        Ok(())
    }

    pub fn create_grid(&self) -> TcnResult<Grid1D> {
        Grid1D::new(self.grid.length, self.grid.points)
    }

    pub fn create_time_axis(&self) -> TcnResult<TimeAxis> {
        TimeAxis::new(self.time.duration, self.time.dt)
    }

    /// Snapshot stride of the configured integrator.
    pub fn active_stride(&self) -> usize {
        match self.integrator {
            IntegratorKind::MemoryFeedback => self.sampling.stride,
            IntegratorKind::Leapfrog => self.leapfrog.sample_stride,
        }
    }
}
