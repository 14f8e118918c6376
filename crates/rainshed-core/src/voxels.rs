//! Voxels - Dense voxel buffer
//!
//! `Voxels<T>` is a 3D array of values stored in raster order with no
//! padding. It is used for intensity grids, boolean masks, and label grids.
//!
//! # Examples
//!
//! ```
//! use rainshed_core::{Extent, Point3, Voxels};
//!
//! let extent = Extent::new(4, 4, 2).unwrap();
//! let mut grid = Voxels::new_with_value(extent, 0u8);
//!
//! grid.set(Point3::new(1, 2, 1), 7).unwrap();
//! assert_eq!(grid.get(Point3::new(1, 2, 1)), Some(7));
//! assert_eq!(grid.get(Point3::new(9, 0, 0)), None);
//! ```

use crate::error::{Error, Result};
use crate::extent::{Extent, Point3};

/// Dense voxel buffer
///
/// The voxel at `p` is at index `extent.index_of(p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxels<T> {
    extent: Extent,
    data: Vec<T>,
}

/// A boolean voxel mask
pub type BinaryVoxels = Voxels<bool>;

impl<T: Clone> Voxels<T> {
    /// Create a new buffer with every voxel set to `value`
    pub fn new_with_value(extent: Extent, value: T) -> Self {
        Voxels {
            extent,
            data: vec![value; extent.len()],
        }
    }
}

impl<T> Voxels<T> {
    /// Create a buffer from raw data in raster order
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match the extent.
    pub fn from_data(extent: Extent, data: Vec<T>) -> Result<Self> {
        if data.len() != extent.len() {
            let (w, h, d) = extent.dimensions();
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                w,
                h,
                d,
                extent.len()
            )));
        }
        Ok(Voxels { extent, data })
    }

    /// Create a single-slice buffer from rows of values
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is empty, or rows have
    /// differing lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self>
    where
        T: Clone,
    {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        let extent = Extent::new_2d(width, height)?;
        let mut data = Vec::with_capacity(extent.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "ragged rows: expected {} values, got {}",
                    width,
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Voxels { extent, data })
    }

    /// Create a buffer by evaluating `f` at every voxel
    pub fn from_fn(extent: Extent, mut f: impl FnMut(Point3) -> T) -> Self {
        let data = extent.points().map(&mut f).collect();
        Voxels { extent, data }
    }

    /// Get the grid shape
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Get raw access to the voxel data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Check that another buffer has the same shape
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the extents differ.
    pub fn check_same_extent<U>(&self, other: &Voxels<U>) -> Result<()> {
        if self.extent != other.extent {
            return Err(Error::DimensionMismatch {
                expected: self.extent.dimensions(),
                actual: other.extent.dimensions(),
            });
        }
        Ok(())
    }
}

impl<T: Copy> Voxels<T> {
    /// Get the value at `p`, or `None` if `p` is outside the grid
    #[inline]
    pub fn get(&self, p: Point3) -> Option<T> {
        self.extent
            .contains(p)
            .then(|| self.data[self.extent.index_of(p)])
    }

    /// Set the value at `p`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if `p` is outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point3, value: T) -> Result<()> {
        if !self.extent.contains(p) {
            let (w, h, _) = self.extent.dimensions();
            return Err(Error::IndexOutOfBounds {
                index: ((p.z as usize) * (h as usize) + (p.y as usize)) * (w as usize)
                    + (p.x as usize),
                len: self.data.len(),
            });
        }
        let idx = self.extent.index_of(p);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the value at a linear offset without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn get_index(&self, index: usize) -> T {
        self.data[index]
    }

    /// Set the value at a linear offset without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set_index(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }
}

impl Voxels<bool> {
    /// Whether the voxel at `p` is on; points outside the grid are off
    #[inline]
    pub fn is_on(&self, p: Point3) -> bool {
        self.get(p).unwrap_or(false)
    }

    /// Number of voxels that are on
    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Coordinates of every voxel that is on, in raster order
    pub fn points_on(&self) -> Vec<Point3> {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(i, _)| self.extent.point_at(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_length_mismatch() {
        let e = Extent::new(2, 2, 2).unwrap();
        assert!(Voxels::from_data(e, vec![0u8; 7]).is_err());
        assert!(Voxels::from_data(e, vec![0u8; 8]).is_ok());
    }

    #[test]
    fn test_from_rows() {
        let v = Voxels::from_rows(&[[1u8, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(v.extent().dimensions(), (3, 2, 1));
        assert_eq!(v.get(Point3::new_2d(2, 1)), Some(6));
        assert_eq!(v.get(Point3::new_2d(0, 1)), Some(4));
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 2], vec![3]];
        assert!(Voxels::from_rows(&rows).is_err());
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(Voxels::from_rows(&empty).is_err());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut v = Voxels::new_with_value(Extent::new_2d(2, 2).unwrap(), 0i32);
        assert!(v.set(Point3::new_2d(2, 0), 1).is_err());
        assert!(v.set(Point3::new(0, 0, 1), 1).is_err());
        assert!(v.set(Point3::new_2d(1, 1), 1).is_ok());
        assert_eq!(v.get_index(3), 1);
    }

    #[test]
    fn test_binary_points_on() {
        let e = Extent::new(3, 1, 2).unwrap();
        let m = Voxels::from_fn(e, |p| p.x == p.z);
        assert_eq!(m.count_on(), 2);
        assert_eq!(
            m.points_on(),
            vec![Point3::new(0, 0, 0), Point3::new(1, 0, 1)]
        );
        assert!(!m.is_on(Point3::new(5, 0, 0)));
    }

    #[test]
    fn test_check_same_extent() {
        let a = Voxels::new_with_value(Extent::new_2d(3, 3).unwrap(), 0u8);
        let b = Voxels::new_with_value(Extent::new(3, 3, 2).unwrap(), false);
        assert!(matches!(
            a.check_same_extent(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
