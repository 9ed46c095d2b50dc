//! Time-stepping core for TCN wave packets.
//!
//! Memory-feedback and leapfrog integrators behind one `FieldIntegrator`
//! contract, superposition of packet histories, post-run stability check,
//! the two-packet collision driver and NPZ export of its results.

pub mod collision;
pub mod export;
pub mod integrator;
pub mod leapfrog;
pub mod memory_feedback;
pub mod stability;
pub mod superposition;
