//! Second-difference (Laplacian) stencils on a uniform 1D grid.
//!
//! Interior points use the 3-point stencil
//!   lap[i] = (f[i+1] - 2 f[i] + f[i-1]) / dx²
//! and the two end points depend on the [`Boundary`] mode.

use ndarray::{s, Array1, ArrayView1, Zip};
use tcn_types::constants::MIN_GRID_POINTS;
use tcn_types::error::{TcnError, TcnResult};
use tcn_types::state::FieldSample;

/// Boundary treatment of the end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Index N-1 neighbours index 0; a packet leaving one edge re-enters
    /// at the other.
    Periodic,
    /// End points are held at their initial value, so their Laplacian is
    /// reported as zero and never applied.
    Dirichlet,
}

/// Laplacian of `field` into a freshly allocated array.
pub fn laplacian<T: FieldSample>(
    field: ArrayView1<'_, T>,
    dx: f64,
    boundary: Boundary,
) -> TcnResult<Array1<T>> {
    let mut out = Array1::from_elem(field.len(), T::ZERO);
    laplacian_into(field, dx, boundary, &mut out)?;
    Ok(out)
}

/// Laplacian of `field` written into `out` (same length, no aliasing).
pub fn laplacian_into<T: FieldSample>(
    field: ArrayView1<'_, T>,
    dx: f64,
    boundary: Boundary,
    out: &mut Array1<T>,
) -> TcnResult<()> {
    let n = field.len();
    if n < MIN_GRID_POINTS {
        return Err(TcnError::PreconditionViolation(format!(
            "Laplacian stencil requires at least {MIN_GRID_POINTS} points, got {n}"
        )));
    }
    if out.len() != n {
        return Err(TcnError::PreconditionViolation(format!(
            "Laplacian output length {} does not match field length {n}",
            out.len()
        )));
    }
    if !dx.is_finite() || dx <= 0.0 {
        return Err(TcnError::PreconditionViolation(format!(
            "Laplacian requires finite dx > 0, got {dx}"
        )));
    }
    let inv_dx2 = 1.0 / (dx * dx);

    Zip::from(out.slice_mut(s![1..n - 1]))
        .and(field.slice(s![2..]))
        .and(field.slice(s![1..n - 1]))
        .and(field.slice(s![..n - 2]))
        .for_each(|o, &right, &centre, &left| {
            *o = (right - centre * 2.0 + left) * inv_dx2;
        });

    match boundary {
        Boundary::Periodic => {
            out[0] = (field[1] - field[0] * 2.0 + field[n - 1]) * inv_dx2;
            out[n - 1] = (field[0] - field[n - 1] * 2.0 + field[n - 2]) * inv_dx2;
        }
        Boundary::Dirichlet => {
            out[0] = T::ZERO;
            out[n - 1] = T::ZERO;
        }
    }
    Ok(())
}
