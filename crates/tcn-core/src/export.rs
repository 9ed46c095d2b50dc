// ─────────────────────────────────────────────────────────────────────
// TCN Wave Packets — NPZ Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! NumPy `.npz` archive of a collision report, for external plotting.
//!
//! Arrays: `x`, `t`, `steps`, `snapshot_indices`, `combined_intensity` and
//! `packet_<k>_intensity` for every independently integrated packet.

use crate::collision::CollisionReport;
use log::info;
use ndarray::{Array, Array1, Array2, Dimension, Ix1, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tcn_types::error::{TcnError, TcnResult};

fn export_err(e: impl std::fmt::Display) -> TcnError {
    TcnError::Export(e.to_string())
}

fn indices(values: &[usize]) -> Array1<u64> {
    values.iter().map(|&v| v as u64).collect()
}

/// Write `report` to `path`, replacing any existing file.
///
/// The archive is assembled next to `path` and renamed into place, so a
/// failed export never leaves a truncated archive at `path`.
pub fn write_npz(report: &CollisionReport, path: impl AsRef<Path>) -> TcnResult<()> {
    let path = path.as_ref();
    let partial = partial_path(path);
    let written = File::create(&partial)
        .map_err(TcnError::from)
        .and_then(|file| write_arrays(report, file))
        .and_then(|()| fs::rename(&partial, path).map_err(TcnError::from));
    if let Err(e) = written {
        fs::remove_file(&partial).ok();
        return Err(e);
    }

    info!(
        "{}: wrote {} snapshot rows to {}",
        report.name,
        report.steps.len(),
        path.display()
    );
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_arrays(report: &CollisionReport, file: File) -> TcnResult<()> {
    let mut writer = NpzWriter::new(file);
    writer.add_array("x", &report.x).map_err(export_err)?;
    writer.add_array("t", &report.times).map_err(export_err)?;
    writer
        .add_array("steps", &indices(&report.steps))
        .map_err(export_err)?;
    writer
        .add_array("snapshot_indices", &indices(&report.snapshot_indices))
        .map_err(export_err)?;
    writer
        .add_array("combined_intensity", &report.combined_intensity)
        .map_err(export_err)?;
    for (k, table) in report.packet_intensity.iter().enumerate() {
        writer
            .add_array(format!("packet_{k}_intensity"), table)
            .map_err(export_err)?;
    }
    writer.finish().map_err(export_err)?;
    Ok(())
}

/// Look up `key` as `{key}.npy` first, then under the bare name.
fn read_named<D: Dimension>(path: &Path, key: &str) -> TcnResult<Array<f64, D>> {
    let mut npz = NpzReader::new(File::open(path)?).map_err(|e| {
        TcnError::Export(format!("failed to open npz '{}': {e}", path.display()))
    })?;
    npz.by_name::<OwnedRepr<f64>, D>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<f64>, D>(key))
        .map_err(|e| TcnError::Export(format!("missing '{key}': {e}")))
}

/// Read one intensity table (e.g. `combined_intensity`) back from an archive.
pub fn read_intensity(path: impl AsRef<Path>, key: &str) -> TcnResult<Array2<f64>> {
    read_named::<Ix2>(path.as_ref(), key)
}

/// Read the coordinate axis `x` back from an archive.
pub fn read_axis(path: impl AsRef<Path>) -> TcnResult<Array1<f64>> {
    read_named::<Ix1>(path.as_ref(), "x")
}
