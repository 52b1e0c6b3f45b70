use crate::segmenter::SegmenterParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a pipeline run reads its volume and writes its results.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Destination for the cleaned label volume.
    pub labels_out: Option<PathBuf>,
    /// Destination for the JSON run report.
    pub report_json: Option<PathBuf>,
}

/// Full configuration of an inference run.
#[derive(Clone, Debug, Deserialize)]
pub struct InferenceConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    /// Checkpoint metadata sidecar; when set, its spacing, interpolation
    /// and normalizers override the corresponding `params` fields.
    pub checkpoint_meta: Option<PathBuf>,
    #[serde(default)]
    pub params: SegmenterParams,
}

pub fn load_config(path: &Path) -> Result<InferenceConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let mut config: InferenceConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if let Some(meta_path) = &config.checkpoint_meta {
        let meta = crate::predictor::CheckpointMeta::load(meta_path)?;
        config.params = config.params.with_checkpoint(&meta);
    }
    Ok(config)
}
