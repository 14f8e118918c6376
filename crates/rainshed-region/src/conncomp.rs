//! Connectivity and neighborhoods
//!
//! This module defines the voxel neighborhoods used by the segmentation
//! engine and connected-component checks on voxel point sets.
//!
//! Neighbor offsets are enumerated in a fixed order: `dz`, then `dy`, then
//! `dx`, each running from -1 to 1, skipping offsets that are not part of
//! the neighborhood. Whenever several neighbors qualify equally, the first
//! one in this order wins.

use rainshed_core::{Extent, Point3};
use std::collections::{HashSet, VecDeque};

/// Connectivity type within a single plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A fixed, ordered table of neighbor offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    offsets: Vec<(i32, i32, i32)>,
    opposite: Vec<u8>,
}

impl Neighborhood {
    /// In-plane neighborhood (4 or 8 neighbors)
    pub fn planar(connectivity: ConnectivityType) -> Self {
        Self::from_filter(|dx, dy, dz| {
            dz == 0
                && match connectivity {
                    ConnectivityType::FourWay => dx.abs() + dy.abs() == 1,
                    ConnectivityType::EightWay => true,
                }
        })
    }

    /// Full 3D neighborhood (26 neighbors)
    pub fn full_3d() -> Self {
        Self::from_filter(|_, _, _| true)
    }

    /// Neighborhood for a grid shape
    ///
    /// The 26-neighborhood is used only when `process_3d` is set and the
    /// grid has more than one slice; otherwise neighbors are restricted to
    /// the voxel's own plane.
    pub fn for_extent(extent: Extent, process_3d: bool, planar: ConnectivityType) -> Self {
        if process_3d && extent.is_3d() {
            Self::full_3d()
        } else {
            Self::planar(planar)
        }
    }

    fn from_filter(keep: impl Fn(i32, i32, i32) -> bool) -> Self {
        let mut offsets = Vec::with_capacity(26);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy, dz) != (0, 0, 0) && keep(dx, dy, dz) {
                        offsets.push((dx, dy, dz));
                    }
                }
            }
        }
        let opposite = offsets
            .iter()
            .map(|&(dx, dy, dz)| {
                offsets
                    .iter()
                    .position(|&o| o == (-dx, -dy, -dz))
                    .unwrap_or_default() as u8
            })
            .collect();
        Self { offsets, opposite }
    }

    /// Number of neighbors
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset `(dx, dy, dz)` for a direction index
    #[inline]
    pub fn offset(&self, direction: u8) -> (i32, i32, i32) {
        self.offsets[direction as usize]
    }

    /// Direction index pointing the other way
    #[inline]
    pub fn opposite(&self, direction: u8) -> u8 {
        self.opposite[direction as usize]
    }

    /// Neighbor of `p` in the given direction, if inside the grid
    #[inline]
    pub fn step(&self, extent: Extent, p: Point3, direction: u8) -> Option<Point3> {
        let (dx, dy, dz) = self.offset(direction);
        extent.offset(p, dx, dy, dz)
    }

    /// In-grid neighbors of `p` with their direction indices, in table order
    pub fn neighbors(&self, extent: Extent, p: Point3) -> impl Iterator<Item = (u8, Point3)> + '_ {
        self.offsets
            .iter()
            .enumerate()
            .filter_map(move |(i, &(dx, dy, dz))| extent.offset(p, dx, dy, dz).map(|q| (i as u8, q)))
    }
}

/// Count the connected components of a point set
///
/// Duplicate points are counted once. Connectivity is taken from
/// `neighborhood`; the extent only bounds neighbor generation.
pub fn count_components(points: &[Point3], extent: Extent, neighborhood: &Neighborhood) -> usize {
    let remaining: HashSet<Point3> = points.iter().copied().collect();
    let mut visited: HashSet<Point3> = HashSet::with_capacity(remaining.len());
    let mut components = 0;
    let mut queue = VecDeque::new();

    for &start in points {
        if !visited.insert(start) {
            continue;
        }
        components += 1;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            for (_, q) in neighborhood.neighbors(extent, p) {
                if remaining.contains(&q) && visited.insert(q) {
                    queue.push_back(q);
                }
            }
        }
    }

    components
}

/// Check that a point set forms exactly one connected component
pub fn is_single_connected(points: &[Point3], extent: Extent, neighborhood: &Neighborhood) -> bool {
    count_components(points, extent, neighborhood) == 1
}
