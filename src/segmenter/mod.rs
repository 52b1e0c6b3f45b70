//! Segmentation pipeline driving tiled inference end-to-end.
//!
//! [`VolumeSegmenter`] exposes a simple API: feed a scalar volume and get a
//! cleaned label volume geometrically aligned with it. Internally it
//! resamples the input to the model's working spacing, normalizes
//! intensities, plans a covering window partition, predicts each tile,
//! reassembles the scores with overlap averaging, restores the labels onto
//! the source grid and applies the configured component filter.
//!
//! Typical usage:
//! ```no_run
//! use volume_segmenter::{SegmenterParams, VolumeSegmenter};
//! # fn example<P: volume_segmenter::DensePredictor>(predictor: P, volume: volume_segmenter::VolumeF32) {
//! let segmenter = VolumeSegmenter::new(SegmenterParams::default(), predictor);
//! let output = segmenter.run(&volume).unwrap();
//! println!("{} tiles in {:.1} ms", output.report.tiles, output.report.timing.total_ms);
//! # }
//! ```

pub mod params;

pub use params::{ParallelTileOptions, SegmenterParams};

use crate::accumulate::ScoreAccumulator;
use crate::components::apply_filter;
use crate::diagnostics::{SegmentationReport, TimingBreakdown};
use crate::error::SegmentationError;
use crate::extract::crop_window;
use crate::partition::{plan, Window};
use crate::predictor::DensePredictor;
use crate::resample::{resample_labels_to_reference, resample_to_spacing};
use crate::volume::{VolumeF32, VolumeU8};
use log::debug;
use nalgebra::Vector3;
use std::time::Instant;

/// Result of one pipeline run: the label volume on the source grid plus a
/// timing/coverage report.
pub struct SegmentationOutput {
    pub labels: VolumeU8,
    pub report: SegmentationReport,
}

/// Tiled-inference orchestrator around a [`DensePredictor`].
pub struct VolumeSegmenter<P: DensePredictor> {
    params: SegmenterParams,
    predictor: P,
}

impl<P: DensePredictor> VolumeSegmenter<P> {
    pub fn new(params: SegmenterParams, predictor: P) -> Self {
        Self { params, predictor }
    }

    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Segment a volume, returning labels on the source voxel grid.
    pub fn run(&self, volume: &VolumeF32) -> Result<SegmentationOutput, SegmentationError> {
        let max_stride = self.predictor.max_stride();
        let num_classes = self.predictor.num_classes();
        debug!(
            "VolumeSegmenter::run start dims={:?} max_stride={max_stride} classes={num_classes}",
            volume.dims()
        );
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        // working grid at the inference spacing, stride-aligned
        let stage_start = Instant::now();
        let target_spacing = Vector3::from(self.params.spacing);
        let mut working = resample_to_spacing(
            volume,
            target_spacing,
            Some(max_stride),
            self.params.interpolation,
        )?;
        timing.push("resample", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        for normalizer in &self.params.normalizers {
            normalizer.apply(&mut working)?;
        }
        timing.push("normalize", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let windows = plan(
            working.dims(),
            working.frame.spacing(),
            &self.params.partition,
            max_stride,
        )?;
        timing.push("partition", elapsed_ms(stage_start));
        let tile_extent = windows[0].extent();
        debug!(
            "planned {} windows of extent {tile_extent:?} over working grid {:?}",
            windows.len(),
            working.dims()
        );

        let stage_start = Instant::now();
        let mut accumulator =
            ScoreAccumulator::new(working.dims(), num_classes, working.frame.clone())?;
        self.predict_tiles(&working, &windows, &mut accumulator)?;
        timing.push("predict", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let (working_labels, coverage) = accumulator.finalize();
        timing.push("finalize", elapsed_ms(stage_start));

        // labels go back onto the source grid with nearest-neighbor lookup
        let stage_start = Instant::now();
        let labels = resample_labels_to_reference(&working_labels, volume.dims(), &volume.frame);
        timing.push("restore", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let labels = apply_filter(
            &labels,
            &self.params.filter_labels,
            self.params.component_filter,
        )?;
        timing.push("filter", elapsed_ms(stage_start));

        timing.total_ms = elapsed_ms(total_start);
        let report = SegmentationReport {
            tiles: windows.len(),
            tile_extent,
            working_dims: working_labels.dims(),
            num_classes,
            uncovered_voxels: coverage.uncovered_voxels,
            max_overlap: coverage.max_overlap,
            timing,
        };
        Ok(SegmentationOutput { labels, report })
    }

    /// Predict every window and paste the scores into the accumulator.
    ///
    /// Tiles are independent, so extraction and prediction may fan out
    /// across threads; the accumulator is filled by a single writer in plan
    /// order, since overlapping windows make concurrent read-modify-write
    /// incorrect.
    fn predict_tiles(
        &self,
        working: &VolumeF32,
        windows: &[Window],
        accumulator: &mut ScoreAccumulator,
    ) -> Result<(), SegmentationError> {
        if self.params.parallel.should_parallelize(windows.len()) {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                let scores = windows
                    .par_iter()
                    .map(|window| {
                        let tile = crop_window(working, window)?;
                        self.predictor.predict(&tile)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                for (window, tile_scores) in windows.iter().zip(&scores) {
                    accumulator.add(window, tile_scores)?;
                }
                return Ok(());
            }
        }

        for window in windows {
            let tile = crop_window(working, window)?;
            let tile_scores = self.predictor.predict(&tile)?;
            accumulator.add(window, &tile_scores)?;
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
