use ndarray::{Array3, Array4};
use volume_segmenter::prelude::*;

/// Demo predictor: scores class 1 by voxel intensity, class 0 by its
/// complement. Stands in for a real network.
struct ThresholdPredictor {
    max_stride: usize,
}

impl DensePredictor for ThresholdPredictor {
    fn num_classes(&self) -> usize {
        2
    }

    fn max_stride(&self) -> usize {
        self.max_stride
    }

    fn predict(
        &self,
        tile: &VolumeF32,
    ) -> Result<Array4<f32>, SegmentationError> {
        let [nx, ny, nz] = tile.dims();
        let mut scores = Array4::zeros((2, nx, ny, nz));
        for ((x, y, z), &v) in tile.data.indexed_iter() {
            scores[(0, x, y, z)] = 1.0 - v;
            scores[(1, x, y, z)] = v;
        }
        Ok(scores)
    }
}

fn main() {
    // Demo stub: a synthetic volume with a bright ball in the middle
    let dims = [96usize, 96, 96];
    let center = 47.5f32;
    let radius = 20.0f32;
    let data = Array3::from_shape_fn(dims, |(x, y, z)| {
        let d = ((x as f32 - center).powi(2)
            + (y as f32 - center).powi(2)
            + (z as f32 - center).powi(2))
        .sqrt();
        if d < radius {
            1.0
        } else {
            0.0
        }
    });
    let volume = VolumeF32::from_parts(data, ImageFrame::identity());

    let params = SegmenterParams {
        spacing: [1.0, 1.0, 1.0],
        partition: PartitionOptions {
            scheme: PartitionScheme::FixedSize,
            size_mm: [64.0, 64.0, 64.0],
            stride_mm: [32.0, 32.0, 32.0],
        },
        component_filter: ComponentFilter::LargestOnly,
        filter_labels: vec![1],
        ..Default::default()
    };
    let segmenter = VolumeSegmenter::new(params, ThresholdPredictor { max_stride: 16 });
    match segmenter.run(&volume) {
        Ok(output) => println!(
            "tiles={} foreground={} latency_ms={:.3}",
            output.report.tiles,
            output.labels.count_label(1),
            output.report.timing.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
