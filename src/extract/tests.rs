use super::*;
use crate::volume::ImageFrame;
use ndarray::Array3;

fn ramp_volume(dims: [usize; 3], frame: ImageFrame) -> VolumeF32 {
    let data = Array3::from_shape_fn(dims, |(x, y, z)| (x + 10 * y + 100 * z) as f32);
    VolumeF32::from_parts(data, frame)
}

#[test]
fn crop_window_copies_values_and_shifts_origin() {
    let frame = ImageFrame::axis_aligned(Vector3::new(2.0, 2.0, 2.0)).unwrap();
    let image = ramp_volume([8, 8, 8], frame);
    let window = Window {
        start: [2, 1, 3],
        end: [6, 5, 7],
    };
    let tile = crop_window(&image, &window).unwrap();
    assert_eq!(tile.dims(), [4, 4, 4]);
    assert_eq!(tile.data[(0, 0, 0)], image.data[(2, 1, 3)]);
    assert_eq!(tile.data[(3, 3, 3)], image.data[(5, 4, 6)]);
    // origin moved to the window start, spacing unchanged
    assert_eq!(*tile.frame.origin(), Vector3::new(4.0, 2.0, 6.0));
    assert_eq!(tile.frame.spacing(), image.frame.spacing());
}

#[test]
fn crop_window_rejects_out_of_range() {
    let image = ramp_volume([4, 4, 4], ImageFrame::identity());
    let window = Window {
        start: [0, 0, 0],
        end: [5, 4, 4],
    };
    assert!(matches!(
        crop_window(&image, &window),
        Err(SegmentationError::InvalidGeometry { .. })
    ));
}

#[test]
fn crop_about_center_places_origin_half_extent_before_center() {
    let image = ramp_volume([16, 16, 16], ImageFrame::identity());
    let center = Vector3::new(8.0, 8.0, 8.0);
    let tile = crop_about_center(
        &image,
        &center,
        [4, 4, 4],
        Vector3::new(2.0, 2.0, 2.0),
        Interpolation::Nearest,
    )
    .unwrap();
    // 4 voxels at 2mm = 8mm extent, so the origin sits 4mm before the center
    assert_eq!(*tile.frame.origin(), Vector3::new(4.0, 4.0, 4.0));
    assert_eq!(tile.dims(), [4, 4, 4]);
    // tile voxel (0,0,0) lands on source voxel (4,4,4)
    assert_eq!(tile.data[(0, 0, 0)], image.data[(4, 4, 4)]);
}

#[test]
fn crop_about_center_matches_source_spacing_is_identity_crop() {
    let image = ramp_volume([12, 12, 12], ImageFrame::identity());
    let tile = crop_about_center(
        &image,
        &Vector3::new(6.0, 6.0, 6.0),
        [6, 6, 6],
        Vector3::new(1.0, 1.0, 1.0),
        Interpolation::Linear,
    )
    .unwrap();
    for x in 0..6 {
        for y in 0..6 {
            for z in 0..6 {
                assert_eq!(tile.data[(x, y, z)], image.data[(x + 3, y + 3, z + 3)]);
            }
        }
    }
}

#[test]
fn crop_about_center_rejects_zero_extent() {
    let image = ramp_volume([4, 4, 4], ImageFrame::identity());
    let result = crop_about_center(
        &image,
        &Vector3::new(2.0, 2.0, 2.0),
        [0, 4, 4],
        Vector3::new(1.0, 1.0, 1.0),
        Interpolation::Nearest,
    );
    assert!(matches!(
        result,
        Err(SegmentationError::InvalidGeometry { .. })
    ));
}
