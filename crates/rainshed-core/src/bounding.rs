//! BoundingBox - Axis-aligned voxel regions
//!
//! A bounding box is described by its minimum corner and an [`Extent`], so
//! it always covers at least one voxel.

use crate::error::{Error, Result};
use crate::extent::{Extent, Point3};

/// An axis-aligned box of voxels
///
/// This is a simple Copy type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Minimum corner (inclusive)
    pub corner: Point3,
    /// Size of the box
    pub extent: Extent,
}

impl BoundingBox {
    /// Create a new box
    pub fn new(corner: Point3, extent: Extent) -> Self {
        Self { corner, extent }
    }

    /// Create a box spanning two inclusive corner points
    ///
    /// The corners may be given in any order.
    pub fn from_corners(a: Point3, b: Point3) -> Result<Self> {
        let lo = a.component_min(&b);
        let hi = a.component_max(&b);
        let extent = Extent::new(hi.x - lo.x + 1, hi.y - lo.y + 1, hi.z - lo.z + 1)?;
        Ok(Self { corner: lo, extent })
    }

    /// Smallest box containing every point
    ///
    /// # Errors
    ///
    /// Returns `Error::NullInput` if `points` is empty.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or(Error::NullInput("bounding box point list"))?;
        let (lo, hi) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.component_min(p), hi.component_max(p)));
        Self::from_corners(lo, hi)
    }

    /// Maximum corner (inclusive)
    #[inline]
    pub fn far_corner(&self) -> Point3 {
        Point3 {
            x: self.corner.x + self.extent.width() - 1,
            y: self.corner.y + self.extent.height() - 1,
            z: self.corner.z + self.extent.depth() - 1,
        }
    }

    /// Number of voxels covered
    #[inline]
    pub fn volume(&self) -> usize {
        self.extent.len()
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        let far = self.far_corner();
        p.x >= self.corner.x
            && p.x <= far.x
            && p.y >= self.corner.y
            && p.y <= far.y
            && p.z >= self.corner.z
            && p.z <= far.z
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains(other.corner) && self.contains(other.far_corner())
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let (a, b) = (self.far_corner(), other.far_corner());
        self.corner.x <= b.x
            && other.corner.x <= a.x
            && self.corner.y <= b.y
            && other.corner.y <= a.y
            && self.corner.z <= b.z
            && other.corner.z <= a.z
    }

    /// Compute the union (bounding box) of two boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let lo = self.corner.component_min(&other.corner);
        let hi = self.far_corner().component_max(&other.far_corner());
        BoundingBox {
            corner: lo,
            extent: Extent::new(hi.x - lo.x + 1, hi.y - lo.y + 1, hi.z - lo.z + 1)
                .unwrap_or(self.extent),
        }
    }

    /// Convert a global point to box-relative coordinates
    pub fn to_relative(&self, p: Point3) -> Option<Point3> {
        self.contains(p).then(|| Point3 {
            x: p.x - self.corner.x,
            y: p.y - self.corner.y,
            z: p.z - self.corner.z,
        })
    }

    /// Convert a box-relative point to global coordinates
    pub fn to_global(&self, p: Point3) -> Point3 {
        Point3 {
            x: p.x + self.corner.x,
            y: p.y + self.corner.y,
            z: p.z + self.corner.z,
        }
    }
}
