//! Error taxonomy shared by the pipeline stages.
//!
//! Geometry and parameter defects are detected eagerly at planning or
//! extraction time and abort the enclosing operation; nothing in this crate
//! retries, since every operation is a deterministic function of its inputs.

/// Reasons why a pipeline stage may refuse its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentationError {
    /// Non-positive or inconsistent size/spacing inputs.
    InvalidGeometry { detail: String },
    /// Interpolation mode outside the supported set.
    UnsupportedInterpolation { requested: String },
    /// Component filtering was requested with no target labels.
    EmptyLabelSet,
    /// The external predictor failed on a tile.
    Predictor { detail: String },
}

impl SegmentationError {
    pub(crate) fn geometry(detail: impl Into<String>) -> Self {
        SegmentationError::InvalidGeometry {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentationError::InvalidGeometry { detail } => {
                write!(f, "invalid geometry: {detail}")
            }
            SegmentationError::UnsupportedInterpolation { requested } => {
                write!(f, "unsupported interpolation type: {requested}")
            }
            SegmentationError::EmptyLabelSet => {
                write!(f, "component filtering requested with an empty label list")
            }
            SegmentationError::Predictor { detail } => {
                write!(f, "predictor failed: {detail}")
            }
        }
    }
}

impl std::error::Error for SegmentationError {}
