// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Smallest grid that still has a left and right neighbour for every
/// interior point of the 3-point Laplacian.
pub const MIN_GRID_POINTS: usize = 3;

/// Slack added to T/dt before flooring, so that 150e-6 / 1e-6 counts 150
/// steps and not 149.
pub const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Leapfrog snapshot stride when none is configured.
pub const DEFAULT_SAMPLE_STRIDE: usize = 5;

/// Peak-magnitude growth (relative to step 0) above which a run is
/// flagged as numerically unstable.
pub const DEFAULT_GROWTH_LIMIT: f64 = 10.0;

/// Normalized Planck constant used by the default scenario.
pub const HBAR_NORMALIZED: f64 = 1.0;

/// Normalized packet mass used by the default scenario.
pub const MASS_NORMALIZED: f64 = 1.0;
