//! Serializable run reports for the segmentation pipeline.

use serde::{Deserialize, Serialize};

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one pipeline run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Summary of one [`crate::VolumeSegmenter`] run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    /// Number of tiles predicted.
    pub tiles: usize,
    /// Voxel extent of each tile in the working grid.
    pub tile_extent: [usize; 3],
    /// Working grid dimensions at the inference spacing.
    pub working_dims: [usize; 3],
    pub num_classes: usize,
    /// Voxels of the working grid no window contributed to.
    pub uncovered_voxels: usize,
    /// Largest number of windows overlapping one voxel.
    pub max_overlap: u32,
    pub timing: TimingBreakdown,
}
