//! Read-only view over the intensity grid, containing mask and neighborhood

use crate::conncomp::Neighborhood;
use crate::error::{RegionError, RegionResult};
use rainshed_core::{BinaryVoxels, Extent, Voxels};

/// Check that the containing mask, if any, shares the extent of `values`
pub(crate) fn check_mask<T>(values: &Voxels<T>, mask: Option<&BinaryVoxels>) -> RegionResult<()> {
    let Some(mask) = mask else {
        return Ok(());
    };
    values.check_same_extent(mask).map_err(|e| match e {
        rainshed_core::Error::DimensionMismatch { expected, actual } => {
            RegionError::MaskShapeMismatch { expected, actual }
        }
        other => other.into(),
    })
}

/// Intensity surface restricted to the containing mask
///
/// Voxels outside the mask are never visited and never reported as
/// neighbors.
pub(crate) struct Terrain<'a, T> {
    values: &'a Voxels<T>,
    mask: Option<&'a BinaryVoxels>,
    neighborhood: Neighborhood,
}

impl<'a, T: Copy + PartialOrd> Terrain<'a, T> {
    /// The mask, if any, must already have the same extent as `values`
    pub(crate) fn new(
        values: &'a Voxels<T>,
        mask: Option<&'a BinaryVoxels>,
        neighborhood: Neighborhood,
    ) -> Self {
        debug_assert!(mask.is_none_or(|m| m.extent() == values.extent()));
        Self {
            values,
            mask,
            neighborhood,
        }
    }

    #[inline]
    pub(crate) fn extent(&self) -> Extent {
        self.values.extent()
    }

    #[inline]
    pub(crate) fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> T {
        self.values.get_index(index)
    }

    #[inline]
    pub(crate) fn in_mask(&self, index: usize) -> bool {
        self.mask.is_none_or(|m| m.get_index(index))
    }

    /// In-grid, in-mask neighbors of `index` as `(direction, neighbor index)`
    pub(crate) fn neighbors(&self, index: usize) -> impl Iterator<Item = (u8, usize)> + '_ {
        let extent = self.extent();
        self.neighborhood
            .neighbors(extent, extent.point_at(index))
            .map(move |(d, q)| (d, extent.index_of(q)))
            .filter(|&(_, qi)| self.in_mask(qi))
    }

    /// Neighbor of `index` in `direction`, if it exists and is inside the mask
    #[inline]
    pub(crate) fn step(&self, index: usize, direction: u8) -> Option<usize> {
        let extent = self.extent();
        self.neighborhood
            .step(extent, extent.point_at(index), direction)
            .map(|q| extent.index_of(q))
            .filter(|&qi| self.in_mask(qi))
    }
}
