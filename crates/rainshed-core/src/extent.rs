//! Extent, Point3 - Grid shape and voxel coordinates
//!
//! Voxels are addressed in raster order: x varies fastest, then y, then z.
//! The linear offset of `(x, y, z)` is `(z * height + y) * width + x`.

use crate::error::{Error, Result};

/// A voxel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point3 {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Slice
    pub z: u32,
}

impl Point3 {
    /// Create a new point
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Create a point on the first slice
    pub const fn new_2d(x: u32, y: u32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Component-wise minimum of two points
    pub fn component_min(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum of two points
    pub fn component_max(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }
}

impl From<(u32, u32, u32)> for Point3 {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self { x, y, z }
    }
}

impl From<(u32, u32)> for Point3 {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y, z: 0 }
    }
}

/// Shape of a voxel grid
///
/// Every dimension is at least 1; a 2D image is an extent with `depth == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    width: u32,
    height: u32,
    depth: u32,
}

impl Extent {
    /// Create a new extent
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0 or the
    /// voxel count does not fit in `u32`.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        let volume = (width as u64) * (height as u64) * (depth as u64);
        if volume == 0 || volume > u32::MAX as u64 {
            return Err(Error::InvalidDimension {
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Create a single-slice extent
    pub fn new_2d(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, 1)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Dimensions as (width, height, depth)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    /// Number of voxels
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.depth as usize)
    }

    /// Always false; an extent holds at least one voxel
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the grid has more than one slice
    #[inline]
    pub fn is_3d(&self) -> bool {
        self.depth > 1
    }

    /// Check if a point lies inside the grid
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        p.x < self.width && p.y < self.height && p.z < self.depth
    }

    /// Linear offset of a point
    ///
    /// The point must be inside the grid.
    #[inline]
    pub fn index_of(&self, p: Point3) -> usize {
        debug_assert!(self.contains(p), "point {p:?} outside extent {self:?}");
        ((p.z as usize) * (self.height as usize) + (p.y as usize)) * (self.width as usize)
            + (p.x as usize)
    }

    /// Point at a linear offset
    #[inline]
    pub fn point_at(&self, index: usize) -> Point3 {
        let w = self.width as usize;
        let plane = w * self.height as usize;
        Point3 {
            x: (index % w) as u32,
            y: ((index % plane) / w) as u32,
            z: (index / plane) as u32,
        }
    }

    /// Translate a point, returning `None` if the result leaves the grid
    #[inline]
    pub fn offset(&self, p: Point3, dx: i32, dy: i32, dz: i32) -> Option<Point3> {
        let x = p.x.checked_add_signed(dx)?;
        let y = p.y.checked_add_signed(dy)?;
        let z = p.z.checked_add_signed(dz)?;
        let q = Point3 { x, y, z };
        self.contains(q).then_some(q)
    }

    /// Iterate over every point in raster order
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        (0..self.len()).map(|i| self.point_at(i))
    }
}
