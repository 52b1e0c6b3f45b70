//! Owned u8 label volume with its physical frame.

use super::frame::ImageFrame;
use ndarray::Array3;

/// Multi-label volume indexed `[x, y, z]`; one class index per voxel.
#[derive(Clone, Debug)]
pub struct VolumeU8 {
    /// Label values in `[x, y, z]` order.
    pub data: Array3<u8>,
    /// Physical placement of the voxel grid.
    pub frame: ImageFrame,
}

impl VolumeU8 {
    /// Background-filled (label 0) volume of the given dimensions.
    pub fn zeros(dims: [usize; 3], frame: ImageFrame) -> Self {
        Self {
            data: Array3::zeros(dims),
            frame,
        }
    }

    pub fn from_parts(data: Array3<u8>, frame: ImageFrame) -> Self {
        Self { data, frame }
    }

    /// Grid dimensions `(nx, ny, nz)`.
    pub fn dims(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.data.dim();
        [nx, ny, nz]
    }

    /// Number of voxels carrying the given label.
    pub fn count_label(&self, label: u8) -> usize {
        self.data.iter().filter(|&&v| v == label).count()
    }
}
