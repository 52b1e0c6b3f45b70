//! Covering window plans over a voxel grid.
//!
//! The planner converts a physical tile size and stride into voxel units,
//! rounds tile extents up to a multiple of the predictor's maximum
//! downsampling stride, and emits the cartesian product of per-axis window
//! placements. Windows at the far boundary are shifted inward rather than
//! padded, so every window has the full tile extent and the grid boundary
//! is always covered.

pub mod options;

#[cfg(test)]
mod tests;

pub use options::{PartitionOptions, PartitionScheme};

use crate::error::SegmentationError;
use nalgebra::Vector3;
use serde::Serialize;

/// Half-open voxel-index box `[start, end)` locating one tile in its grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: [usize; 3],
    pub end: [usize; 3],
}

impl Window {
    /// Voxel extent per axis.
    pub fn extent(&self) -> [usize; 3] {
        [
            self.end[0] - self.start[0],
            self.end[1] - self.start[1],
            self.end[2] - self.start[2],
        ]
    }

    pub fn num_voxels(&self) -> usize {
        let e = self.extent();
        e[0] * e[1] * e[2]
    }

    pub fn contains(&self, index: [usize; 3]) -> bool {
        (0..3).all(|axis| index[axis] >= self.start[axis] && index[axis] < self.end[axis])
    }
}

/// Round `n` up to the next multiple of `stride` (`n` itself if already one).
pub fn next_multiple(n: usize, stride: usize) -> usize {
    debug_assert!(stride >= 1);
    n.div_ceil(stride) * stride
}

/// Plan a covering set of windows over a grid.
///
/// `PartitionScheme::Disabled` yields one window spanning the whole grid.
/// Otherwise the plan guarantees:
///
/// - every voxel index in `[0, dims)` lies in at least one window,
/// - every window extent is a multiple of `max_stride` on every axis,
/// - no window end exceeds `dims`.
///
/// Precondition (documented, not runtime-checked): the rounded tile extent
/// must not exceed `dims` on any axis; callers pick a tile size compatible
/// with the smallest volume they feed in. Debug builds assert this.
pub fn plan(
    dims: [usize; 3],
    spacing: &Vector3<f64>,
    options: &PartitionOptions,
    max_stride: usize,
) -> Result<Vec<Window>, SegmentationError> {
    if max_stride == 0 {
        return Err(SegmentationError::geometry("max_stride must be >= 1"));
    }
    if dims.iter().any(|&d| d == 0) {
        return Err(SegmentationError::geometry(format!(
            "grid dimensions must be positive, got {dims:?}"
        )));
    }
    if let PartitionScheme::Disabled = options.scheme {
        return Ok(vec![Window {
            start: [0; 3],
            end: dims,
        }]);
    }
    if spacing.iter().any(|&s| s <= 0.0) {
        return Err(SegmentationError::geometry("spacing must be positive"));
    }
    if options.size_mm.iter().any(|&s| s <= 0.0) || options.stride_mm.iter().any(|&s| s <= 0.0) {
        return Err(SegmentationError::geometry(
            "tile size and stride must be positive",
        ));
    }

    let mut box_size = [0usize; 3];
    let mut stride_size = [0usize; 3];
    let mut tiles = [0usize; 3];
    for axis in 0..3 {
        let size = (options.size_mm[axis] / spacing[axis] + 0.5) as usize;
        box_size[axis] = next_multiple(size.max(1), max_stride);
        stride_size[axis] = ((options.stride_mm[axis] / spacing[axis] + 0.5) as usize).max(1);
        debug_assert!(
            box_size[axis] <= dims[axis],
            "tile extent {} exceeds grid extent {} on axis {axis}",
            box_size[axis],
            dims[axis]
        );
        tiles[axis] = if dims[axis] <= box_size[axis] {
            1
        } else {
            1 + (dims[axis] - box_size[axis]).div_ceil(stride_size[axis])
        };
    }

    let mut windows = Vec::with_capacity(tiles[0] * tiles[1] * tiles[2]);
    for ix in 0..tiles[0] {
        for iy in 0..tiles[1] {
            for iz in 0..tiles[2] {
                let index = [ix, iy, iz];
                let mut start = [0usize; 3];
                let mut end = [0usize; 3];
                for axis in 0..3 {
                    start[axis] = index[axis] * stride_size[axis];
                    end[axis] = start[axis] + box_size[axis];
                    if end[axis] > dims[axis] {
                        end[axis] = dims[axis];
                        start[axis] = end[axis].saturating_sub(box_size[axis]);
                    }
                }
                windows.push(Window { start, end });
            }
        }
    }
    Ok(windows)
}
