//! Numerical primitives for TCN wave packets.

pub mod history;
pub mod kernel;
pub mod packet;
pub mod stencil;
