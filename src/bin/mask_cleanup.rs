//! Standalone connected-component cleanup of a stored label volume.
//!
//! Usage: `mask_cleanup <config.json>`; see
//! [`volume_segmenter::config::cleanup::CleanupToolConfig`] for the fields.

use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use volume_segmenter::components::apply_filter;
use volume_segmenter::config::cleanup::{load_config, CleanupToolConfig};
use volume_segmenter::volume::io::{load_label_volume, save_label_volume, write_json_file};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CleanupReport {
    input: PathBuf,
    output: PathBuf,
    labels: Vec<u8>,
    voxels_before: Vec<usize>,
    voxels_after: Vec<usize>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(path) => path,
        None => return Err("usage: mask_cleanup <config.json>".to_string()),
    };
    let config = load_config(Path::new(&config_path))?;

    let mask = load_label_volume(&config.input)?;
    let before: Vec<usize> = config
        .labels
        .iter()
        .map(|&label| mask.count_label(label))
        .collect();

    let cleaned =
        apply_filter(&mask, &config.labels, config.filter).map_err(|e| e.to_string())?;
    save_label_volume(&cleaned, &config.output)?;
    println!("cleaned volume written to {}", config.output.display());

    if let Some(report_path) = &config.report_json {
        let report = report_for(&config, before, &cleaned);
        write_json_file(report_path, &report)?;
        println!("JSON report written to {}", report_path.display());
    }
    Ok(())
}

fn report_for(
    config: &CleanupToolConfig,
    voxels_before: Vec<usize>,
    cleaned: &volume_segmenter::VolumeU8,
) -> CleanupReport {
    CleanupReport {
        input: config.input.clone(),
        output: config.output.clone(),
        labels: config.labels.clone(),
        voxels_before,
        voxels_after: config
            .labels
            .iter()
            .map(|&label| cleaned.count_label(label))
            .collect(),
    }
}
