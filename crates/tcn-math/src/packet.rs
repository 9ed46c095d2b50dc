//! Gaussian wave packet initial conditions.
//!
//! Envelope exp(-(x - c)² / (2 w²)) with either a cosine carrier
//! cos(v·(x - c)) or a travelling carrier exp(i·v·(x - c)). The cosine
//! packet is the real part of the travelling one.

use ndarray::Array1;
use num_complex::Complex64;
use tcn_types::config::{Carrier, PacketConfig};
use tcn_types::error::TcnResult;

pub fn gaussian_envelope(x: f64, center: f64, width: f64) -> f64 {
    let d = x - center;
    (-d * d / (2.0 * width * width)).exp()
}

/// Real packet with a cosine carrier.
pub fn gaussian_packet(x: &Array1<f64>, center: f64, width: f64, velocity: f64) -> Array1<f64> {
    x.mapv(|xi| gaussian_envelope(xi, center, width) * (velocity * (xi - center)).cos())
}

/// Complex packet carrying net momentum `velocity`.
pub fn travelling_packet(
    x: &Array1<f64>,
    center: f64,
    width: f64,
    velocity: f64,
) -> Array1<Complex64> {
    x.mapv(|xi| {
        Complex64::from_polar(
            gaussian_envelope(xi, center, width),
            velocity * (xi - center),
        )
    })
}

/// Real initial field for `packet`. The travelling carrier has no real
/// counterpart beyond its real part, which is the cosine packet.
pub fn real_field(x: &Array1<f64>, packet: &PacketConfig) -> TcnResult<Array1<f64>> {
    packet.validate()?;
    Ok(gaussian_packet(
        x,
        packet.center,
        packet.width,
        packet.velocity,
    ))
}

/// Complex initial field for `packet`.
pub fn complex_field(x: &Array1<f64>, packet: &PacketConfig) -> TcnResult<Array1<Complex64>> {
    packet.validate()?;
    Ok(match packet.carrier {
        Carrier::Cosine => gaussian_packet(x, packet.center, packet.width, packet.velocity)
            .mapv(|v| Complex64::new(v, 0.0)),
        Carrier::Travelling => {
            travelling_packet(x, packet.center, packet.width, packet.velocity)
        }
    })
}
