//! Parameter types configuring the segmentation pipeline.

use crate::components::ComponentFilter;
use crate::normalize::IntensityNormalizer;
use crate::partition::PartitionOptions;
use crate::predictor::CheckpointMeta;
use crate::resample::Interpolation;
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
///
/// Defaults mirror a common dental-CT setup: 0.4 mm working spacing, 51.2 mm
/// non-overlapping tiles, linear interpolation, no component filtering.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    /// Voxel spacing (mm) the volume is resampled to before prediction.
    pub spacing: [f64; 3],
    /// Interpolation used for the input resample and tile extraction.
    pub interpolation: Interpolation,
    /// Tile geometry for the partition planner.
    pub partition: PartitionOptions,
    /// Intensity normalizers applied to the working volume, in order.
    pub normalizers: Vec<IntensityNormalizer>,
    /// Post-processing of the final label volume.
    pub component_filter: ComponentFilter,
    /// Foreground labels the component filter operates on.
    pub filter_labels: Vec<u8>,
    /// When to fan tile prediction out across threads.
    pub parallel: ParallelTileOptions,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            spacing: [0.4, 0.4, 0.4],
            interpolation: Interpolation::Linear,
            partition: PartitionOptions::default(),
            normalizers: Vec::new(),
            component_filter: ComponentFilter::None,
            filter_labels: Vec::new(),
            parallel: ParallelTileOptions::default(),
        }
    }
}

impl SegmenterParams {
    /// Adopt the inference constraints stored with a model checkpoint:
    /// working spacing, interpolation and normalizers.
    pub fn with_checkpoint(mut self, meta: &CheckpointMeta) -> Self {
        self.spacing = meta.spacing;
        self.interpolation = meta.interpolation;
        self.normalizers = meta.normalizers.clone();
        self
    }
}

/// Controls whether tile extraction/prediction runs sequentially or fans
/// out over Rayon. Accumulation stays single-writer either way.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelTileOptions {
    enabled: bool,
    min_tiles_for_parallel: usize,
}

impl ParallelTileOptions {
    /// Construct explicit options.
    pub fn new(enabled: bool, min_tiles_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_tiles_for_parallel: min_tiles_for_parallel.max(1),
        }
    }

    /// Disable parallel prediction regardless of tile count.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_tiles_for_parallel: usize::MAX,
        }
    }

    /// Returns true when parallel prediction should be used for `tile_count`.
    pub fn should_parallelize(&self, tile_count: usize) -> bool {
        self.enabled && tile_count >= self.min_tiles_for_parallel
    }
}

impl Default for ParallelTileOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_tiles_for_parallel: 2,
        }
    }
}
