//! Seed marking
//!
//! Seeds are pre-labeled connected voxel regions. Before the main pass each
//! seed's voxels receive one shared raw region id, taken from the linear
//! offset of the seed voxel that comes first in raster order.

use super::encoding::EncodedLabelGrid;
use super::minima::MinimaStore;
use crate::conncomp::{Neighborhood, count_components};
use crate::error::{RegionError, RegionResult};
use rainshed_core::{BinaryVoxels, Point3};
use std::collections::HashMap;

/// A connected set of voxels that anchors one region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Seed {
    points: Vec<Point3>,
}

impl Seed {
    /// Create a seed from its voxel coordinates
    ///
    /// Connectivity is validated when the seed is applied, since it depends
    /// on the neighborhood in use.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Voxels of the seed
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Whether the seed has no voxels
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point3>> for Seed {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3> for Seed {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Label every seed into the grid
///
/// All seeds are validated before any voxel is written. Seed voxels outside
/// the containing mask are left untouched and take no part in the
/// connectivity and overlap checks; a seed with no in-mask voxel is
/// skipped. When `minima` is given, the anchor voxel of each seed is
/// recorded as a single-voxel minimum.
///
/// The mask, if any, must already have the grid's extent.
///
/// Returns the number of seeds that labeled at least one voxel.
///
/// # Errors
///
/// * [`RegionError::SeedOutOfBounds`] if a seed voxel lies outside the grid
/// * [`RegionError::SeedNotSingleConnected`] if a seed is empty or its
///   in-mask voxels are split
/// * [`RegionError::SeedsOverlap`] if two seeds share an in-mask voxel
pub(crate) fn apply_seeds(
    seeds: &[Seed],
    labels: &mut EncodedLabelGrid,
    mut minima: Option<&mut MinimaStore>,
    mask: Option<&BinaryVoxels>,
    neighborhood: &Neighborhood,
) -> RegionResult<usize> {
    let extent = labels.extent();
    debug_assert!(mask.is_none_or(|m| m.extent() == extent));
    let mut owner: HashMap<usize, usize> = HashMap::new();
    let mut marked_indices: Vec<Vec<usize>> = Vec::with_capacity(seeds.len());

    for (i, seed) in seeds.iter().enumerate() {
        if seed.is_empty() {
            return Err(RegionError::SeedNotSingleConnected {
                seed: i,
                components: 0,
            });
        }
        if let Some(p) = seed.points().iter().find(|p| !extent.contains(**p)) {
            return Err(RegionError::SeedOutOfBounds {
                seed: i,
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }

        let inside: Vec<Point3> = seed
            .points()
            .iter()
            .copied()
            .filter(|&p| mask.is_none_or(|m| m.is_on(p)))
            .collect();
        let components = count_components(&inside, extent, neighborhood);
        if components > 1 {
            return Err(RegionError::SeedNotSingleConnected {
                seed: i,
                components,
            });
        }

        let mut indices: Vec<usize> = inside.iter().map(|&p| extent.index_of(p)).collect();
        indices.sort_unstable();
        indices.dedup();
        for &idx in &indices {
            if let Some(first) = owner.insert(idx, i) {
                return Err(RegionError::SeedsOverlap { first, second: i });
            }
        }
        marked_indices.push(indices);
    }

    let mut marked = 0;
    for indices in marked_indices {
        let Some(&anchor) = indices.first() else {
            continue;
        };
        let id = anchor as u32;
        for idx in indices {
            labels.set_region(idx, id);
        }
        if let Some(store) = minima.as_deref_mut() {
            store.add_point(extent.point_at(anchor));
        }
        marked += 1;
    }

    Ok(marked)
}
