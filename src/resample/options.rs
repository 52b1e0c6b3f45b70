use crate::error::SegmentationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-voxel value computation used when resampling or cropping.
///
/// Selection never affects geometry; only how values are read from the
/// source grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Nearest-neighbor lookup; the right choice for label volumes.
    #[serde(rename = "NN")]
    Nearest,
    /// Trilinear blend of the eight surrounding voxels.
    #[default]
    #[serde(rename = "LINEAR")]
    Linear,
}

impl FromStr for Interpolation {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NN" => Ok(Interpolation::Nearest),
            "LINEAR" => Ok(Interpolation::Linear),
            other => Err(SegmentationError::UnsupportedInterpolation {
                requested: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::Nearest => write!(f, "NN"),
            Interpolation::Linear => write!(f, "LINEAR"),
        }
    }
}
