//! Reassembly of per-tile predictions into a full-volume label map.
//!
//! The accumulator keeps a running per-class score sum and a per-voxel
//! overlap count. Tiles are pasted additively, so overlapping windows
//! average rather than overwrite; finalize divides by the count and takes
//! the arg-max class per voxel. Tiles can stream in one at a time — peak
//! memory is one tile plus the two full-volume buffers.


use crate::error::SegmentationError;
use crate::partition::Window;
use crate::volume::{ImageFrame, VolumeU8};
use log::warn;
use ndarray::{s, Array3, Array4, Zip};
use serde::Serialize;

/// Coverage statistics reported by [`ScoreAccumulator::finalize`].
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Voxels that received no tile contribution. These keep their
    /// zero-initialized scores and the background label.
    pub uncovered_voxels: usize,
    /// Largest number of windows overlapping a single voxel.
    pub max_overlap: u32,
}

/// Streaming sum/count reassembler for per-tile class scores.
pub struct ScoreAccumulator {
    sum: Array4<f32>,
    count: Array3<u32>,
    frame: ImageFrame,
}

impl ScoreAccumulator {
    /// Allocate zeroed buffers for a `dims` output grid and `num_classes`
    /// score channels.
    pub fn new(
        dims: [usize; 3],
        num_classes: usize,
        frame: ImageFrame,
    ) -> Result<Self, SegmentationError> {
        if num_classes == 0 {
            return Err(SegmentationError::geometry("num_classes must be >= 1"));
        }
        if num_classes > 256 {
            return Err(SegmentationError::geometry(format!(
                "num_classes {num_classes} exceeds the 256 labels a u8 volume can hold"
            )));
        }
        if dims.iter().any(|&d| d == 0) {
            return Err(SegmentationError::geometry(format!(
                "output dimensions must be positive, got {dims:?}"
            )));
        }
        Ok(Self {
            sum: Array4::zeros((num_classes, dims[0], dims[1], dims[2])),
            count: Array3::zeros(dims),
            frame,
        })
    }

    pub fn num_classes(&self) -> usize {
        self.sum.dim().0
    }

    pub fn dims(&self) -> [usize; 3] {
        let (_, nx, ny, nz) = self.sum.dim();
        [nx, ny, nz]
    }

    /// Paste one tile's `(classes, ex, ey, ez)` scores at `window`.
    ///
    /// Contributions are summed and the overlap count over the window is
    /// incremented, never overwritten.
    pub fn add(&mut self, window: &Window, scores: &Array4<f32>) -> Result<(), SegmentationError> {
        let dims = self.dims();
        for axis in 0..3 {
            if window.end[axis] <= window.start[axis] || window.end[axis] > dims[axis] {
                return Err(SegmentationError::geometry(format!(
                    "window {:?}..{:?} does not fit accumulator grid {dims:?}",
                    window.start, window.end
                )));
            }
        }
        let extent = window.extent();
        let expected = (self.num_classes(), extent[0], extent[1], extent[2]);
        if scores.dim() != expected {
            return Err(SegmentationError::geometry(format!(
                "tile scores have shape {:?}, expected {expected:?}",
                scores.dim()
            )));
        }

        let mut sum_region = self.sum.slice_mut(s![
            ..,
            window.start[0]..window.end[0],
            window.start[1]..window.end[1],
            window.start[2]..window.end[2]
        ]);
        Zip::from(&mut sum_region)
            .and(scores)
            .for_each(|acc, &score| *acc += score);

        let mut count_region = self.count.slice_mut(s![
            window.start[0]..window.end[0],
            window.start[1]..window.end[1],
            window.start[2]..window.end[2]
        ]);
        count_region.mapv_inplace(|c| c + 1);
        Ok(())
    }

    /// Count-normalized scores: `sum / count` per voxel, zero where the
    /// count is zero.
    pub fn mean_scores(&self) -> Array4<f32> {
        let mut mean = self.sum.clone();
        for class in 0..self.num_classes() {
            let mut channel = mean.slice_mut(s![class, .., .., ..]);
            Zip::from(&mut channel).and(&self.count).for_each(|m, &c| {
                if c > 0 {
                    *m /= c as f32;
                }
            });
        }
        mean
    }

    /// Average overlapping contributions and take the per-voxel arg-max.
    ///
    /// Ties break toward the lowest class index. Voxels never covered by a
    /// window keep label 0; they are tallied in the coverage report and
    /// reported once through `log::warn`.
    pub fn finalize(self) -> (VolumeU8, CoverageReport) {
        let dims = self.dims();
        let num_classes = self.num_classes();
        let mut labels = VolumeU8::zeros(dims, self.frame.clone());
        let mut report = CoverageReport::default();

        for x in 0..dims[0] {
            for y in 0..dims[1] {
                for z in 0..dims[2] {
                    let count = self.count[(x, y, z)];
                    report.max_overlap = report.max_overlap.max(count);
                    if count == 0 {
                        report.uncovered_voxels += 1;
                        continue;
                    }
                    let inv = 1.0 / count as f32;
                    let mut best_class = 0usize;
                    let mut best_score = self.sum[(0, x, y, z)] * inv;
                    for class in 1..num_classes {
                        let score = self.sum[(class, x, y, z)] * inv;
                        if score > best_score {
                            best_score = score;
                            best_class = class;
                        }
                    }
                    labels.data[(x, y, z)] = best_class as u8;
                }
            }
        }

        if report.uncovered_voxels > 0 {
            warn!(
                "{} of {} voxels received no tile contribution; left as background",
                report.uncovered_voxels,
                dims[0] * dims[1] * dims[2]
            );
        }
        (labels, report)
    }
}
