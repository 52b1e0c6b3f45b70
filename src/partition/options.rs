use serde::{Deserialize, Serialize};

/// How the inference volume is carved into tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionScheme {
    /// Fixed-size windows of `size_mm`, moved by `stride_mm`.
    #[default]
    #[serde(rename = "SIZE")]
    FixedSize,
    /// A single window spanning the whole volume.
    #[serde(rename = "DISABLE")]
    Disabled,
}

/// Physical tile geometry for the partition planner.
///
/// With `stride_mm` equal to `size_mm` the windows do not overlap; a
/// smaller stride overlaps neighboring windows and the overlapped scores
/// are averaged during accumulation. A stride of a quarter of the tile size
/// is a good default against seams between windows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionOptions {
    pub scheme: PartitionScheme,
    /// Physical tile size per axis, millimetres.
    pub size_mm: [f64; 3],
    /// Physical stride between tile starts per axis, millimetres.
    pub stride_mm: [f64; 3],
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            scheme: PartitionScheme::FixedSize,
            size_mm: [51.2, 51.2, 51.2],
            stride_mm: [51.2, 51.2, 51.2],
        }
    }
}

impl PartitionOptions {
    /// Single-window plan regardless of tile geometry.
    pub fn disabled() -> Self {
        Self {
            scheme: PartitionScheme::Disabled,
            ..Self::default()
        }
    }
}
