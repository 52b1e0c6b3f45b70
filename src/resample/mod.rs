//! Resampling between voxel grids.
//!
//! - `resample_to_spacing`: change the voxel spacing, deriving the output
//!   size from the physical extent (optionally rounded up to a multiple of
//!   the predictor stride).
//! - `resample_to_reference`: sample a volume onto an explicit target grid,
//!   used to align outputs back to a source volume.
//! - `resample_labels_to_reference`: nearest-neighbor variant for label
//!   volumes.
//!
//! All modes preserve the physical position of voxel (0, 0, 0): origin and
//! direction never change, only spacing, size and values. Samples outside
//! the source extent read as zero.

pub mod options;


pub use options::Interpolation;

use crate::error::SegmentationError;
use crate::partition::next_multiple;
use crate::volume::{ImageFrame, VolumeF32, VolumeU8};
use nalgebra::{Matrix3, Vector3};
use ndarray::Array3;

/// Affine map from one grid's voxel indices to another's continuous indices.
pub(crate) struct VoxelAffine {
    linear: Matrix3<f64>,
    offset: Vector3<f64>,
}

impl VoxelAffine {
    /// Map indices of `dst` into continuous indices of `src`.
    pub(crate) fn between(src: &ImageFrame, dst: &ImageFrame) -> Self {
        let src_inv_spacing = Matrix3::from_diagonal(&src.spacing().map(|s| 1.0 / s));
        let to_src_axes = src_inv_spacing * src.direction().transpose();
        let linear = to_src_axes * dst.direction() * Matrix3::from_diagonal(dst.spacing());
        let offset = to_src_axes * (dst.origin() - src.origin());
        Self { linear, offset }
    }

    #[inline]
    pub(crate) fn apply(&self, index: &Vector3<f64>) -> Vector3<f64> {
        self.linear * index + self.offset
    }
}

/// Resample a volume to a new spacing.
///
/// The output size is the physical extent divided by the new spacing,
/// rounded half-up, then rounded up to the next multiple of `max_stride`
/// when one is given — the same rounding the partition planner applies to
/// tile extents.
pub fn resample_to_spacing(
    image: &VolumeF32,
    target_spacing: Vector3<f64>,
    max_stride: Option<usize>,
    interpolation: Interpolation,
) -> Result<VolumeF32, SegmentationError> {
    let out_frame = image.frame.with_spacing(target_spacing)?;
    if let Some(0) = max_stride {
        return Err(SegmentationError::geometry("max_stride must be >= 1"));
    }
    let in_dims = image.dims();
    let in_spacing = image.frame.spacing();
    let mut out_dims = [0usize; 3];
    for axis in 0..3 {
        let extent = in_dims[axis] as f64 * in_spacing[axis];
        let mut size = ((extent / target_spacing[axis] + 0.5) as usize).max(1);
        if let Some(stride) = max_stride {
            size = next_multiple(size, stride);
        }
        out_dims[axis] = size;
    }
    Ok(resample_f32(image, out_dims, out_frame, interpolation))
}

/// Sample a volume onto an explicit reference grid.
pub fn resample_to_reference(
    image: &VolumeF32,
    reference_dims: [usize; 3],
    reference_frame: &ImageFrame,
    interpolation: Interpolation,
) -> VolumeF32 {
    resample_f32(image, reference_dims, reference_frame.clone(), interpolation)
}

/// Nearest-neighbor resample of a label volume onto a reference grid.
pub fn resample_labels_to_reference(
    labels: &VolumeU8,
    reference_dims: [usize; 3],
    reference_frame: &ImageFrame,
) -> VolumeU8 {
    let map = VoxelAffine::between(&labels.frame, reference_frame);
    let mut out = Array3::zeros(reference_dims);
    for ((x, y, z), value) in out.indexed_iter_mut() {
        let p = map.apply(&Vector3::new(x as f64, y as f64, z as f64));
        *value = nearest_sample(&labels.data, &p);
    }
    VolumeU8::from_parts(out, reference_frame.clone())
}

fn resample_f32(
    image: &VolumeF32,
    out_dims: [usize; 3],
    out_frame: ImageFrame,
    interpolation: Interpolation,
) -> VolumeF32 {
    let map = VoxelAffine::between(&image.frame, &out_frame);
    let mut out = Array3::zeros(out_dims);
    for ((x, y, z), value) in out.indexed_iter_mut() {
        let p = map.apply(&Vector3::new(x as f64, y as f64, z as f64));
        *value = match interpolation {
            Interpolation::Nearest => nearest_sample(&image.data, &p),
            Interpolation::Linear => trilinear_sample(&image.data, &p),
        };
    }
    VolumeF32::from_parts(out, out_frame)
}

fn nearest_sample<T: Copy + Default>(data: &Array3<T>, p: &Vector3<f64>) -> T {
    let (nx, ny, nz) = data.dim();
    let x = p.x.round();
    let y = p.y.round();
    let z = p.z.round();
    if x < 0.0 || y < 0.0 || z < 0.0 {
        return T::default();
    }
    let (x, y, z) = (x as usize, y as usize, z as usize);
    if x >= nx || y >= ny || z >= nz {
        return T::default();
    }
    data[(x, y, z)]
}

fn trilinear_sample(data: &Array3<f32>, p: &Vector3<f64>) -> f32 {
    let (nx, ny, nz) = data.dim();
    let x0 = p.x.floor();
    let y0 = p.y.floor();
    let z0 = p.z.floor();
    let fx = p.x - x0;
    let fy = p.y - y0;
    let fz = p.z - z0;

    let mut acc = 0.0f64;
    for corner in 0..8 {
        let dx = corner & 1;
        let dy = (corner >> 1) & 1;
        let dz = (corner >> 2) & 1;
        let weight = (if dx == 1 { fx } else { 1.0 - fx })
            * (if dy == 1 { fy } else { 1.0 - fy })
            * (if dz == 1 { fz } else { 1.0 - fz });
        if weight == 0.0 {
            continue;
        }
        let cx = x0 + dx as f64;
        let cy = y0 + dy as f64;
        let cz = z0 + dz as f64;
        if cx < 0.0 || cy < 0.0 || cz < 0.0 {
            continue;
        }
        let (cx, cy, cz) = (cx as usize, cy as usize, cz as usize);
        if cx >= nx || cy >= ny || cz >= nz {
            continue;
        }
        acc += weight * data[(cx, cy, cz)] as f64;
    }
    acc as f32
}
