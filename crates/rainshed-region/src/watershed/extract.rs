//! Object extraction
//!
//! Turns the fully labeled grid into compact objects, each a bounding box
//! plus a binary mask relative to that box.

use super::encoding::EncodedLabelGrid;
use super::terrain::Terrain;
use crate::error::{RegionError, RegionResult};
use rainshed_core::{BinaryVoxels, BoundingBox, Point3, Voxels};
use std::collections::HashMap;

/// One segmented region
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledObject {
    bounds: BoundingBox,
    mask: BinaryVoxels,
}

impl LabeledObject {
    /// Create an object from its bounding box and box-relative mask
    ///
    /// # Errors
    ///
    /// Returns an error if the mask shape differs from the box extent.
    pub fn new(bounds: BoundingBox, mask: BinaryVoxels) -> RegionResult<Self> {
        if mask.extent() != bounds.extent {
            return Err(rainshed_core::Error::DimensionMismatch {
                expected: bounds.extent.dimensions(),
                actual: mask.extent().dimensions(),
            }
            .into());
        }
        Ok(Self { bounds, mask })
    }

    /// Build an object covering exactly the given points
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvariantViolation`] if `points` is empty.
    pub fn from_points(points: &[Point3]) -> RegionResult<Self> {
        let bounds = BoundingBox::from_points(points)
            .map_err(|e| RegionError::InvariantViolation(format!("object from points: {e}")))?;
        let mut mask = Voxels::new_with_value(bounds.extent, false);
        for &p in points {
            if let Some(rel) = bounds.to_relative(p) {
                mask.set(rel, true)?;
            }
        }
        Ok(Self { bounds, mask })
    }

    /// Bounding box in grid coordinates
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Binary mask relative to the bounding box
    pub fn mask(&self) -> &BinaryVoxels {
        &self.mask
    }

    /// Number of voxels in the object
    pub fn voxel_count(&self) -> usize {
        self.mask.count_on()
    }

    /// Whether the object covers the grid point `p`
    pub fn contains(&self, p: Point3) -> bool {
        self.bounds
            .to_relative(p)
            .is_some_and(|rel| self.mask.is_on(rel))
    }

    /// Grid coordinates of every voxel, in raster order
    pub fn points(&self) -> Vec<Point3> {
        self.mask
            .points_on()
            .into_iter()
            .map(|rel| self.bounds.to_global(rel))
            .collect()
    }
}

/// Compact raw ids into objects in first-seen raster order
///
/// Also returns the compact label grid: 0 outside the mask, `k + 1` for
/// voxels of object `k`.
pub(crate) fn extract_objects<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &EncodedLabelGrid,
) -> RegionResult<(Vec<LabeledObject>, Voxels<u32>)> {
    let extent = labels.extent();
    let mut compact = Voxels::new_with_value(extent, 0u32);
    let mut index_of: HashMap<u32, u32> = HashMap::new();
    let mut corners: Vec<(Point3, Point3)> = Vec::new();

    for i in 0..extent.len() {
        if !terrain.in_mask(i) {
            continue;
        }
        let raw = labels.region(i).ok_or_else(|| {
            RegionError::InvariantViolation(format!(
                "voxel {:?} has no region id",
                extent.point_at(i)
            ))
        })?;
        let p = extent.point_at(i);
        let k = *index_of.entry(raw).or_insert_with(|| {
            corners.push((p, p));
            (corners.len() - 1) as u32
        });
        let (lo, hi) = &mut corners[k as usize];
        *lo = lo.component_min(&p);
        *hi = hi.component_max(&p);
        compact.set_index(i, k + 1);
    }

    let objects = corners
        .iter()
        .enumerate()
        .map(|(k, &(lo, hi))| {
            let bounds = BoundingBox::from_corners(lo, hi).map_err(|e| {
                RegionError::InvariantViolation(format!("bounds of object {k}: {e}"))
            })?;
            let owner = k as u32 + 1;
            let mask = Voxels::from_fn(bounds.extent, |rel| {
                compact.get_index(extent.index_of(bounds.to_global(rel))) == owner
            });
            Ok(LabeledObject { bounds, mask })
        })
        .collect::<RegionResult<Vec<_>>>()?;

    Ok((objects, compact))
}

/// One object per minimum point list
pub(crate) fn objects_from_minima(minima: &[Vec<Point3>]) -> RegionResult<Vec<LabeledObject>> {
    minima
        .iter()
        .map(|points| LabeledObject::from_points(points))
        .collect()
}
