#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod predictor;
pub mod segmenter;
pub mod volume;

// Stage-level modules – public so the pieces can be driven individually.
pub mod accumulate;
pub mod components;
pub mod extract;
pub mod normalize;
pub mod partition;
pub mod resample;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::segmenter::{SegmentationOutput, SegmenterParams, VolumeSegmenter};

// The model seam and its persisted constraints.
pub use crate::predictor::{CheckpointMeta, DensePredictor};

// Core value types.
pub use crate::error::SegmentationError;
pub use crate::partition::Window;
pub use crate::resample::Interpolation;
pub use crate::volume::{ImageFrame, VolumeF32, VolumeU8};

// High-level diagnostics returned by the pipeline.
pub use crate::diagnostics::SegmentationReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::components::ComponentFilter;
    pub use crate::partition::{PartitionOptions, PartitionScheme};
    pub use crate::{
        DensePredictor, ImageFrame, Interpolation, SegmentationError, SegmentationOutput,
        SegmenterParams, VolumeF32, VolumeSegmenter, VolumeU8,
    };
}
