//! Tile extraction from a source volume.
//!
//! Two entry points:
//!
//! - `crop_window`: integer voxel window at the source spacing; a pure copy,
//!   no resampling.
//! - `crop_about_center`: physical path producing a tile of arbitrary
//!   spacing around a world-space center, independent of the source's
//!   native spacing.

#[cfg(test)]
mod tests;

use crate::error::SegmentationError;
use crate::partition::Window;
use crate::resample::{resample_to_reference, Interpolation};
use crate::volume::{ImageFrame, VolumeF32};
use nalgebra::Vector3;
use ndarray::s;

/// Crop an integer voxel window out of a volume.
///
/// The tile keeps the source spacing and direction; its origin is the world
/// position of the window's start voxel.
pub fn crop_window(image: &VolumeF32, window: &Window) -> Result<VolumeF32, SegmentationError> {
    let dims = image.dims();
    for axis in 0..3 {
        if window.end[axis] <= window.start[axis] || window.end[axis] > dims[axis] {
            return Err(SegmentationError::geometry(format!(
                "window {:?}..{:?} does not fit grid {dims:?}",
                window.start, window.end
            )));
        }
    }
    let data = image
        .data
        .slice(s![
            window.start[0]..window.end[0],
            window.start[1]..window.end[1],
            window.start[2]..window.end[2]
        ])
        .to_owned();
    let start = Vector3::new(
        window.start[0] as f64,
        window.start[1] as f64,
        window.start[2] as f64,
    );
    let origin = image.frame.voxel_to_world(&start);
    let frame = image.frame.with_origin(origin);
    Ok(VolumeF32::from_parts(data, frame))
}

/// Crop a tile of `size` voxels at `spacing` around a world-space center.
///
/// The tile's origin is placed half the physical tile extent before the
/// center on each axis; the source direction is reused, and values are
/// resampled with the requested interpolation. No coordinate-system
/// transform is applied: the tile shares the source's world frame.
pub fn crop_about_center(
    image: &VolumeF32,
    center_world: &Vector3<f64>,
    size: [usize; 3],
    spacing: Vector3<f64>,
    interpolation: Interpolation,
) -> Result<VolumeF32, SegmentationError> {
    if size.iter().any(|&s| s == 0) {
        return Err(SegmentationError::geometry(format!(
            "tile size must be positive on every axis, got {size:?}"
        )));
    }
    let origin = Vector3::new(
        center_world.x - size[0] as f64 * spacing.x / 2.0,
        center_world.y - size[1] as f64 * spacing.y / 2.0,
        center_world.z - size[2] as f64 * spacing.z / 2.0,
    );
    let frame = ImageFrame::new(spacing, origin, *image.frame.direction())?;
    Ok(resample_to_reference(image, size, &frame, interpolation))
}
