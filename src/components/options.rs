use serde::{Deserialize, Serialize};

/// Voxel adjacency rule for component labeling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// 6-neighborhood: face-adjacent voxels only.
    Face,
    /// 26-neighborhood: face, edge and corner adjacency.
    #[default]
    Full,
}

/// Post-processing applied to the label volume after accumulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComponentFilter {
    /// Leave the label volume untouched.
    #[default]
    None,
    /// Keep only the largest connected component per filtered label.
    LargestOnly,
    /// Discard components smaller than `threshold` voxels. A threshold of
    /// zero disables filtering entirely.
    MinSize { threshold: usize },
}
