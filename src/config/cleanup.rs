use crate::components::ComponentFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the standalone mask cleanup tool.
#[derive(Clone, Debug, Deserialize)]
pub struct CleanupToolConfig {
    /// Label volume to clean.
    pub input: PathBuf,
    /// Destination for the filtered volume.
    pub output: PathBuf,
    /// Foreground labels to filter.
    pub labels: Vec<u8>,
    #[serde(default = "default_filter")]
    pub filter: ComponentFilter,
    /// Optional JSON summary of what the filter changed.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_filter() -> ComponentFilter {
    ComponentFilter::LargestOnly
}

pub fn load_config(path: &Path) -> Result<CleanupToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
