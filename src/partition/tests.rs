use super::*;
use nalgebra::Vector3;
use ndarray::Array3;

fn unit_spacing() -> Vector3<f64> {
    Vector3::new(1.0, 1.0, 1.0)
}

fn fixed(size_mm: [f64; 3], stride_mm: [f64; 3]) -> PartitionOptions {
    PartitionOptions {
        scheme: PartitionScheme::FixedSize,
        size_mm,
        stride_mm,
    }
}

#[test]
fn next_multiple_rounds_up() {
    assert_eq!(next_multiple(51, 16), 64);
    assert_eq!(next_multiple(64, 16), 64);
    assert_eq!(next_multiple(1, 16), 16);
}

#[test]
fn stride_rounding_and_clamping_on_a_100_grid() {
    // 100^3 grid at 1mm, 51.2mm tiles, stride equal to tile size: the 51
    // voxel tile rounds up to 64 (next multiple of 16), giving
    // ceil((100 - 64) / 64) + 1 = 2 placements per axis. The second one is
    // clamped inward to [36, 100) so the boundary stays covered.
    let windows = plan(
        [100; 3],
        &unit_spacing(),
        &fixed([51.2; 3], [51.2; 3]),
        16,
    )
    .unwrap();
    assert_eq!(windows.len(), 8);
    assert_eq!(windows[0].start, [0; 3]);
    assert_eq!(windows[0].end, [64; 3]);
    let last = windows.last().unwrap();
    assert_eq!(last.start, [36; 3]);
    assert_eq!(last.end, [100; 3]);
    for w in &windows {
        assert_eq!(w.extent(), [64; 3]);
    }
}

#[test]
fn windows_cover_every_voxel() {
    let dims = [70usize, 50, 40];
    let windows = plan(
        dims,
        &unit_spacing(),
        &fixed([32.0; 3], [20.0; 3]),
        16,
    )
    .unwrap();
    let mut covered = Array3::<u32>::zeros(dims);
    for w in &windows {
        for x in w.start[0]..w.end[0] {
            for y in w.start[1]..w.end[1] {
                for z in w.start[2]..w.end[2] {
                    covered[(x, y, z)] += 1;
                }
            }
        }
    }
    assert!(covered.iter().all(|&c| c >= 1), "uncovered voxel in plan");
}

#[test]
fn extents_are_stride_multiples_and_clamped() {
    let dims = [70usize, 50, 40];
    let max_stride = 16;
    let windows = plan(
        dims,
        &unit_spacing(),
        &fixed([30.0; 3], [25.0; 3]),
        max_stride,
    )
    .unwrap();
    let mut last_end = [0usize; 3];
    for w in &windows {
        for axis in 0..3 {
            let extent = w.end[axis] - w.start[axis];
            assert_eq!(extent % max_stride, 0, "extent {extent} not a stride multiple");
            assert!(w.end[axis] <= dims[axis]);
            last_end[axis] = last_end[axis].max(w.end[axis]);
        }
    }
    assert_eq!(last_end, dims, "last window per axis must reach the boundary");
}

#[test]
fn grid_smaller_than_tile_yields_one_window_per_axis() {
    let windows = plan(
        [48, 48, 48],
        &unit_spacing(),
        &fixed([48.0; 3], [24.0; 3]),
        16,
    )
    .unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, [0; 3]);
    assert_eq!(windows[0].end, [48; 3]);
}

#[test]
fn overlapping_stride_produces_expected_tile_count() {
    // 100 voxels, 64-voxel tiles, 32-voxel stride: ceil((100-64)/32) + 1 = 3.
    let windows = plan(
        [100, 64, 64],
        &unit_spacing(),
        &fixed([64.0; 3], [32.0, 64.0, 64.0]),
        16,
    )
    .unwrap();
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].start[0], 0);
    assert_eq!(windows[1].start[0], 32);
    // last window clamped inward
    assert_eq!(windows[2].start[0], 36);
    assert_eq!(windows[2].end[0], 100);
}

#[test]
fn spacing_scales_voxel_extents() {
    // 0.5mm voxels: a 16mm tile is 32 voxels.
    let windows = plan(
        [64, 64, 64],
        &Vector3::new(0.5, 0.5, 0.5),
        &fixed([16.0; 3], [16.0; 3]),
        16,
    )
    .unwrap();
    assert_eq!(windows.len(), 8);
    assert_eq!(windows[0].extent(), [32, 32, 32]);
}

#[test]
fn disabled_scheme_spans_grid() {
    let windows = plan(
        [30, 40, 50],
        &unit_spacing(),
        &PartitionOptions::disabled(),
        16,
    )
    .unwrap();
    assert_eq!(
        windows,
        vec![Window {
            start: [0; 3],
            end: [30, 40, 50],
        }]
    );
}

#[test]
fn rejects_bad_inputs() {
    let err = plan([10; 3], &unit_spacing(), &fixed([0.0; 3], [8.0; 3]), 8);
    assert!(matches!(err, Err(SegmentationError::InvalidGeometry { .. })));
    let err = plan([10; 3], &unit_spacing(), &fixed([8.0; 3], [8.0; 3]), 0);
    assert!(matches!(err, Err(SegmentationError::InvalidGeometry { .. })));
}
