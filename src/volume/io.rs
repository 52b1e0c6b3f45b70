//! I/O helpers for volumes and JSON reports.
//!
//! - `load_volume_f32` / `save_volume_f32`: NIfTI scalar volumes.
//! - `load_label_volume` / `save_label_volume`: NIfTI multi-label volumes.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The physical frame is taken from the sform rows of the NIfTI header when
//! present and falls back to `pixdim` spacing with an axis-aligned
//! orientation otherwise.

use super::frame::ImageFrame;
use super::{VolumeF32, VolumeU8};
use nalgebra::{Matrix3, Vector3};
use ndarray::{Array3, ArrayD, Axis, Ix3};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a scalar volume together with its frame.
pub fn load_volume_f32(path: &Path) -> Result<VolumeF32, String> {
    let (data, frame) = load_array_f32(path)?;
    Ok(VolumeF32::from_parts(data, frame))
}

/// Load a label volume; voxel values are rounded and clamped to `u8`.
pub fn load_label_volume(path: &Path) -> Result<VolumeU8, String> {
    let (data, frame) = load_array_f32(path)?;
    let labels = data.mapv(|v| v.round().clamp(0.0, 255.0) as u8);
    Ok(VolumeU8::from_parts(labels, frame))
}

/// Save a scalar volume, writing its frame into the sform header fields.
pub fn save_volume_f32(volume: &VolumeF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let header = header_from_frame(&volume.frame);
    nifti::writer::WriterOptions::new(path)
        .reference_header(&header)
        .write_nifti(&volume.data)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a label volume, writing its frame into the sform header fields.
pub fn save_label_volume(volume: &VolumeU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let header = header_from_frame(&volume.frame);
    nifti::writer::WriterOptions::new(path)
        .reference_header(&header)
        .write_nifti(&volume.data)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn load_array_f32(path: &Path) -> Result<(Array3<f32>, ImageFrame), String> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let frame = frame_from_header(obj.header())
        .map_err(|e| format!("Bad frame in {}: {e}", path.display()))?;
    let data = obj
        .into_volume()
        .into_ndarray::<f32>()
        .map_err(|e| format!("Failed to read voxels from {}: {e}", path.display()))?;
    let data = squeeze_trailing(data);
    let data = data.into_dimensionality::<Ix3>().map_err(|_| {
        format!(
            "{} is not a 3D volume; split 4D files into 3D volumes first",
            path.display()
        )
    })?;
    Ok((data, frame))
}

/// Drop trailing singleton axes, e.g. a (x, y, z, 1) time axis.
fn squeeze_trailing(mut data: ArrayD<f32>) -> ArrayD<f32> {
    while data.ndim() > 3 && data.shape()[data.ndim() - 1] == 1 {
        let last = data.ndim() - 1;
        data = data.index_axis_move(Axis(last), 0);
    }
    data
}

fn frame_from_header(header: &NiftiHeader) -> Result<ImageFrame, String> {
    if header.sform_code > 0 {
        let rows = [header.srow_x, header.srow_y, header.srow_z];
        let mut spacing = Vector3::zeros();
        let mut direction = Matrix3::identity();
        let mut degenerate = false;
        for col in 0..3 {
            let axis = Vector3::new(
                rows[0][col] as f64,
                rows[1][col] as f64,
                rows[2][col] as f64,
            );
            let norm = axis.norm();
            if norm <= f64::EPSILON {
                degenerate = true;
                break;
            }
            spacing[col] = norm;
            direction.set_column(col, &(axis / norm));
        }
        if !degenerate {
            let origin = Vector3::new(rows[0][3] as f64, rows[1][3] as f64, rows[2][3] as f64);
            return ImageFrame::new(spacing, origin, direction).map_err(|e| e.to_string());
        }
    }
    let spacing = Vector3::new(
        fallback_spacing(header.pixdim[1]),
        fallback_spacing(header.pixdim[2]),
        fallback_spacing(header.pixdim[3]),
    );
    ImageFrame::axis_aligned(spacing).map_err(|e| e.to_string())
}

fn fallback_spacing(pixdim: f32) -> f64 {
    let s = pixdim.abs() as f64;
    if s > 0.0 {
        s
    } else {
        1.0
    }
}

fn header_from_frame(frame: &ImageFrame) -> NiftiHeader {
    let spacing = frame.spacing();
    let origin = frame.origin();
    let direction = frame.direction();
    let mut pixdim = [0.0f32; 8];
    pixdim[0] = 1.0;
    let mut srow = [[0.0f32; 4]; 3];
    for row in 0..3 {
        pixdim[row + 1] = spacing[row] as f32;
        for col in 0..3 {
            srow[row][col] = (direction[(row, col)] * spacing[col]) as f32;
        }
        srow[row][3] = origin[row] as f32;
    }
    NiftiHeader {
        pixdim,
        srow_x: srow[0],
        srow_y: srow[1],
        srow_z: srow[2],
        sform_code: 1,
        qform_code: 0,
        ..NiftiHeader::default()
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
