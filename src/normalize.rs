//! Intensity normalization applied before prediction.

use crate::error::SegmentationError;
use crate::volume::VolumeF32;
use serde::{Deserialize, Serialize};

/// How voxel intensities are brought into the range the predictor was
/// trained on. One normalizer corresponds to one input modality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IntensityNormalizer {
    /// Subtract `mean`, divide by `std`; optionally clamp to [-1, 1].
    Fixed { mean: f32, std: f32, clip: bool },
    /// Map the volume's own min/max intensity range to [-1, 1].
    Adaptive,
}

impl IntensityNormalizer {
    /// Normalize `volume` in place.
    pub fn apply(&self, volume: &mut VolumeF32) -> Result<(), SegmentationError> {
        match *self {
            IntensityNormalizer::Fixed { mean, std, clip } => {
                if std <= 0.0 || !std.is_finite() {
                    return Err(SegmentationError::geometry(format!(
                        "fixed normalizer std must be positive, got {std}"
                    )));
                }
                volume.data.mapv_inplace(|v| {
                    let n = (v - mean) / std;
                    if clip {
                        n.clamp(-1.0, 1.0)
                    } else {
                        n
                    }
                });
                Ok(())
            }
            IntensityNormalizer::Adaptive => {
                let mut min = f32::INFINITY;
                let mut max = f32::NEG_INFINITY;
                for &v in volume.data.iter() {
                    min = min.min(v);
                    max = max.max(v);
                }
                // constant volumes carry no usable intensity range
                if !(max > min) {
                    return Ok(());
                }
                let scale = 2.0 / (max - min);
                volume.data.mapv_inplace(|v| (v - min) * scale - 1.0);
                Ok(())
            }
        }
    }
}
