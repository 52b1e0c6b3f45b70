//! Connected-component post-processing of multi-label volumes.
//!
//! Both filter modes share one algorithm: label the components of each
//! target label's binary mask, relabel them by size descending, then keep
//! either the single largest component or every component above a voxel
//! count threshold. Labels outside the target set pass through unchanged,
//! and the filtered per-label masks compose additively — the caller is
//! responsible for mutually exclusive input labels.

pub mod options;

#[cfg(test)]
mod tests;

pub use options::{ComponentFilter, Connectivity};

use crate::error::SegmentationError;
use crate::volume::VolumeU8;
use ndarray::Array3;
use std::collections::VecDeque;

/// Component map of a binary mask.
///
/// Component ids start at 1 and are ordered by size descending; id 1 is the
/// largest component. `sizes[id - 1]` is the voxel count of component `id`.
/// Ties keep scan order, so equal-sized components resolve deterministically.
pub struct ComponentLabels {
    pub map: Array3<u32>,
    pub sizes: Vec<usize>,
}

impl ComponentLabels {
    pub fn num_components(&self) -> usize {
        self.sizes.len()
    }
}

/// Label the connected components of `mask`, size-descending ids.
pub fn label_components(mask: &Array3<bool>, connectivity: Connectivity) -> ComponentLabels {
    let (nx, ny, nz) = mask.dim();
    let mut provisional = Array3::<u32>::zeros((nx, ny, nz));
    let mut raw_sizes: Vec<usize> = Vec::new();
    let mut queue: VecDeque<(usize, usize, usize)> = VecDeque::new();

    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                if !mask[(x, y, z)] || provisional[(x, y, z)] != 0 {
                    continue;
                }
                let id = raw_sizes.len() as u32 + 1;
                let mut size = 0usize;
                provisional[(x, y, z)] = id;
                queue.push_back((x, y, z));
                while let Some((cx, cy, cz)) = queue.pop_front() {
                    size += 1;
                    for &(sx, sy, sz) in neighbors(connectivity) {
                        let px = cx as isize + sx;
                        let py = cy as isize + sy;
                        let pz = cz as isize + sz;
                        if px < 0
                            || py < 0
                            || pz < 0
                            || px >= nx as isize
                            || py >= ny as isize
                            || pz >= nz as isize
                        {
                            continue;
                        }
                        let p = (px as usize, py as usize, pz as usize);
                        if mask[p] && provisional[p] == 0 {
                            provisional[p] = id;
                            queue.push_back(p);
                        }
                    }
                }
                raw_sizes.push(size);
            }
        }
    }

    // relabel so id 1 is the largest component; stable sort keeps scan
    // order between equal sizes
    let mut order: Vec<usize> = (0..raw_sizes.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(raw_sizes[i]));
    let mut remap = vec![0u32; raw_sizes.len() + 1];
    for (rank, &raw) in order.iter().enumerate() {
        remap[raw + 1] = rank as u32 + 1;
    }
    let map = provisional.mapv(|id| remap[id as usize]);
    let sizes = order.iter().map(|&i| raw_sizes[i]).collect();
    ComponentLabels { map, sizes }
}

/// Keep only the largest connected component of each label in `labels`.
///
/// Uses full 26-neighbor adjacency. Labels not listed pass through
/// unchanged; for listed labels every voxel outside the largest component
/// is reset to background.
pub fn keep_largest_component(
    mask: &VolumeU8,
    labels: &[u8],
) -> Result<VolumeU8, SegmentationError> {
    filter_components(mask, labels, None)
}

/// Discard components of the listed labels smaller than `threshold` voxels.
///
/// A threshold of zero is an identity pass-through — the shortcut for "no
/// filtering wanted".
pub fn remove_small_components(
    mask: &VolumeU8,
    labels: &[u8],
    threshold: usize,
) -> Result<VolumeU8, SegmentationError> {
    if threshold == 0 {
        return Ok(mask.clone());
    }
    filter_components(mask, labels, Some(threshold))
}

/// Apply a [`ComponentFilter`] mode to a label volume.
pub fn apply_filter(
    mask: &VolumeU8,
    labels: &[u8],
    filter: ComponentFilter,
) -> Result<VolumeU8, SegmentationError> {
    match filter {
        ComponentFilter::None => Ok(mask.clone()),
        ComponentFilter::LargestOnly => keep_largest_component(mask, labels),
        ComponentFilter::MinSize { threshold } => remove_small_components(mask, labels, threshold),
    }
}

/// Shared filter core: `min_size == None` keeps only component 1, otherwise
/// every component with `size >= min_size`.
fn filter_components(
    mask: &VolumeU8,
    labels: &[u8],
    min_size: Option<usize>,
) -> Result<VolumeU8, SegmentationError> {
    if labels.is_empty() {
        return Err(SegmentationError::EmptyLabelSet);
    }

    // untouched labels pass through
    let mut out = mask.clone();
    for voxel in out.data.iter_mut() {
        if labels.contains(voxel) {
            *voxel = 0;
        }
    }

    for &label in labels {
        let binary = mask.data.mapv(|v| v == label);
        let components = label_components(&binary, Connectivity::Full);
        if components.num_components() == 0 {
            continue;
        }
        let keep = |id: u32| -> bool {
            match min_size {
                None => id == 1,
                Some(threshold) => components.sizes[id as usize - 1] >= threshold,
            }
        };
        ndarray::Zip::from(&mut out.data)
            .and(&components.map)
            .for_each(|voxel, &id| {
                if id != 0 && keep(id) {
                    *voxel += label;
                }
            });
    }
    Ok(out)
}

fn neighbors(connectivity: Connectivity) -> &'static [(isize, isize, isize)] {
    const FACE: [(isize, isize, isize); 6] = [
        (-1, 0, 0),
        (1, 0, 0),
        (0, -1, 0),
        (0, 1, 0),
        (0, 0, -1),
        (0, 0, 1),
    ];
    const FULL: [(isize, isize, isize); 26] = [
        (-1, -1, -1),
        (-1, -1, 0),
        (-1, -1, 1),
        (-1, 0, -1),
        (-1, 0, 0),
        (-1, 0, 1),
        (-1, 1, -1),
        (-1, 1, 0),
        (-1, 1, 1),
        (0, -1, -1),
        (0, -1, 0),
        (0, -1, 1),
        (0, 0, -1),
        (0, 0, 1),
        (0, 1, -1),
        (0, 1, 0),
        (0, 1, 1),
        (1, -1, -1),
        (1, -1, 0),
        (1, -1, 1),
        (1, 0, -1),
        (1, 0, 0),
        (1, 0, 1),
        (1, 1, -1),
        (1, 1, 0),
        (1, 1, 1),
    ];
    match connectivity {
        Connectivity::Face => &FACE,
        Connectivity::Full => &FULL,
    }
}
