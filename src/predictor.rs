//! The seam between this crate and the dense-prediction model.

use crate::error::SegmentationError;
use crate::normalize::IntensityNormalizer;
use crate::resample::Interpolation;
use crate::volume::VolumeF32;
use ndarray::Array4;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A dense per-voxel classifier over fixed-size tiles.
///
/// `predict` consumes a tile whose voxel extent is divisible by
/// [`DensePredictor::max_stride`] on every axis and returns one score
/// channel per class with the same voxel dimensions as the tile, shaped
/// `(num_classes, nx, ny, nz)`. The call is synchronous from the pipeline's
/// perspective; implementations may batch internally as long as completed
/// scores come back.
pub trait DensePredictor: Sync {
    fn num_classes(&self) -> usize;

    /// Largest cumulative downsampling factor applied inside the model.
    /// Tile extents must be multiples of this value.
    fn max_stride(&self) -> usize;

    fn predict(&self, tile: &VolumeF32) -> Result<Array4<f32>, SegmentationError>;
}

/// Sidecar metadata persisted next to model weights.
///
/// Inference-time partitioning must reproduce the constraints the model was
/// trained under, so the maximum stride, working spacing, interpolation
/// mode, channel counts and normalizers travel with every checkpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointMeta {
    /// Model architecture name, informational only.
    pub net: String,
    pub max_stride: usize,
    /// Voxel spacing (mm) the model operates at.
    pub spacing: [f64; 3],
    pub interpolation: Interpolation,
    pub in_channels: usize,
    pub out_channels: usize,
    #[serde(default)]
    pub normalizers: Vec<IntensityNormalizer>,
}

impl CheckpointMeta {
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read checkpoint metadata {}: {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse checkpoint metadata {}: {e}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        crate::volume::io::write_json_file(path, self)
    }
}
