use super::*;
use crate::volume::ImageFrame;
use ndarray::Array3;

fn label_volume(dims: [usize; 3]) -> VolumeU8 {
    VolumeU8::zeros(dims, ImageFrame::identity())
}

fn fill_box(vol: &mut VolumeU8, start: [usize; 3], end: [usize; 3], label: u8) {
    for x in start[0]..end[0] {
        for y in start[1]..end[1] {
            for z in start[2]..end[2] {
                vol.data[(x, y, z)] = label;
            }
        }
    }
}

#[test]
fn diagonal_voxels_connect_only_under_full_adjacency() {
    let mut mask = Array3::from_elem((3, 3, 3), false);
    mask[(0, 0, 0)] = true;
    mask[(1, 1, 1)] = true;

    let face = label_components(&mask, Connectivity::Face);
    assert_eq!(face.num_components(), 2);

    let full = label_components(&mask, Connectivity::Full);
    assert_eq!(full.num_components(), 1);
    assert_eq!(full.sizes, vec![2]);
}

#[test]
fn components_are_relabeled_by_size_descending() {
    let mut mask = Array3::from_elem((10, 3, 3), false);
    // small blob first in scan order, large blob second
    mask[(0, 0, 0)] = true;
    for x in 4..9 {
        mask[(x, 1, 1)] = true;
    }
    let components = label_components(&mask, Connectivity::Full);
    assert_eq!(components.sizes, vec![5, 1]);
    assert_eq!(components.map[(5, 1, 1)], 1);
    assert_eq!(components.map[(0, 0, 0)], 2);
}

#[test]
fn largest_only_keeps_one_component_per_label() {
    let mut vol = label_volume([12, 6, 6]);
    fill_box(&mut vol, [0, 0, 0], [4, 4, 4], 1); // 64 voxels
    fill_box(&mut vol, [8, 0, 0], [10, 2, 2], 1); // 8 voxels, detached
    fill_box(&mut vol, [5, 4, 4], [7, 6, 6], 2); // untouched label

    let cleaned = keep_largest_component(&vol, &[1]).unwrap();
    assert_eq!(cleaned.count_label(1), 64);
    assert_eq!(cleaned.data[(9, 1, 1)], 0);
    // label 2 passes through unchanged
    assert_eq!(cleaned.count_label(2), vol.count_label(2));
}

#[test]
fn largest_only_is_idempotent() {
    let mut vol = label_volume([12, 6, 6]);
    fill_box(&mut vol, [0, 0, 0], [4, 4, 4], 1);
    fill_box(&mut vol, [8, 0, 0], [10, 2, 2], 1);

    let once = keep_largest_component(&vol, &[1]).unwrap();
    let twice = keep_largest_component(&once, &[1]).unwrap();
    assert_eq!(once.data, twice.data);
}

#[test]
fn min_size_drops_small_components_only() {
    let mut vol = label_volume([12, 6, 6]);
    fill_box(&mut vol, [0, 0, 0], [4, 4, 4], 1); // 64 voxels
    fill_box(&mut vol, [8, 0, 0], [10, 2, 2], 1); // 8 voxels

    let cleaned = remove_small_components(&vol, &[1], 10).unwrap();
    assert_eq!(cleaned.count_label(1), 64);

    let keep_both = remove_small_components(&vol, &[1], 8).unwrap();
    assert_eq!(keep_both.count_label(1), 72);
}

#[test]
fn min_size_threshold_is_monotone_in_foreground_count() {
    let mut vol = label_volume([12, 6, 6]);
    fill_box(&mut vol, [0, 0, 0], [4, 4, 4], 1);
    fill_box(&mut vol, [8, 0, 0], [10, 2, 2], 1);
    fill_box(&mut vol, [11, 5, 5], [12, 6, 6], 1);

    let mut previous = usize::MAX;
    for threshold in [1usize, 2, 8, 9, 64, 65] {
        let cleaned = remove_small_components(&vol, &[1], threshold).unwrap();
        let foreground = cleaned.count_label(1);
        assert!(
            foreground <= previous,
            "foreground grew from {previous} to {foreground} at threshold {threshold}"
        );
        previous = foreground;
    }
}

#[test]
fn zero_threshold_is_identity() {
    let mut vol = label_volume([8, 8, 8]);
    fill_box(&mut vol, [0, 0, 0], [2, 2, 2], 1);
    fill_box(&mut vol, [5, 5, 5], [6, 6, 6], 1);

    let out = remove_small_components(&vol, &[1], 0).unwrap();
    assert_eq!(out.data, vol.data);
    // identity also holds with no labels listed, since nothing is filtered
    let out = remove_small_components(&vol, &[], 0).unwrap();
    assert_eq!(out.data, vol.data);
}

#[test]
fn empty_label_set_is_rejected_when_filtering() {
    let vol = label_volume([4, 4, 4]);
    assert!(matches!(
        keep_largest_component(&vol, &[]),
        Err(SegmentationError::EmptyLabelSet)
    ));
    assert!(matches!(
        remove_small_components(&vol, &[], 5),
        Err(SegmentationError::EmptyLabelSet)
    ));
}

#[test]
fn filter_mode_dispatch() {
    let mut vol = label_volume([8, 4, 4]);
    fill_box(&mut vol, [0, 0, 0], [3, 3, 3], 1);
    fill_box(&mut vol, [6, 0, 0], [7, 1, 1], 1);

    let untouched = apply_filter(&vol, &[1], ComponentFilter::None).unwrap();
    assert_eq!(untouched.data, vol.data);

    let largest = apply_filter(&vol, &[1], ComponentFilter::LargestOnly).unwrap();
    assert_eq!(largest.count_label(1), 27);

    let min_size = apply_filter(&vol, &[1], ComponentFilter::MinSize { threshold: 2 }).unwrap();
    assert_eq!(min_size.count_label(1), 27);
}
