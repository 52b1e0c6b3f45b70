//! Owned f32 voxel volume with its physical frame.

use super::frame::ImageFrame;
use ndarray::Array3;

/// Dense scalar volume indexed `[x, y, z]`.
///
/// Transforms elsewhere in the crate never mutate a volume in place; they
/// return new instances with a consistent frame.
#[derive(Clone, Debug)]
pub struct VolumeF32 {
    /// Voxel values in `[x, y, z]` order.
    pub data: Array3<f32>,
    /// Physical placement of the voxel grid.
    pub frame: ImageFrame,
}

impl VolumeF32 {
    /// Zero-filled volume of the given dimensions.
    pub fn zeros(dims: [usize; 3], frame: ImageFrame) -> Self {
        Self {
            data: Array3::zeros(dims),
            frame,
        }
    }

    pub fn from_parts(data: Array3<f32>, frame: ImageFrame) -> Self {
        Self { data, frame }
    }

    /// Grid dimensions `(nx, ny, nz)`.
    pub fn dims(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.data.dim();
        [nx, ny, nz]
    }

    pub fn num_voxels(&self) -> usize {
        self.data.len()
    }
}
