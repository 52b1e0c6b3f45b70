use ndarray::Array3;
use volume_segmenter::{ImageFrame, VolumeF32};

/// Binary volume with a bright ball at `center` and zero background.
pub fn ball_volume(dims: [usize; 3], center: [f32; 3], radius: f32) -> VolumeF32 {
    let data = Array3::from_shape_fn(dims, |(x, y, z)| {
        let d = ((x as f32 - center[0]).powi(2)
            + (y as f32 - center[1]).powi(2)
            + (z as f32 - center[2]).powi(2))
        .sqrt();
        if d < radius {
            1.0
        } else {
            0.0
        }
    });
    VolumeF32::from_parts(data, ImageFrame::identity())
}

/// Set a rectangular region of a volume to the given intensity.
pub fn paint_box(volume: &mut VolumeF32, start: [usize; 3], end: [usize; 3], value: f32) {
    for x in start[0]..end[0] {
        for y in start[1]..end[1] {
            for z in start[2]..end[2] {
                volume.data[(x, y, z)] = value;
            }
        }
    }
}
