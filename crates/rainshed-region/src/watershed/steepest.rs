//! Steepest-descent classification of a single voxel

use super::encoding::EncodedLabelGrid;
use super::terrain::Terrain;

/// Outcome of examining one unvisited voxel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Descent {
    /// Flow toward the neighbor in this direction
    Direction(u8),
    /// An equal-valued neighbor exists and nothing lower does
    Plateau,
    /// Every neighbor is strictly higher, or there are none
    Minimum,
}

/// Pick the best candidate: lowest value, ties to the earlier direction
#[inline]
pub(crate) fn prefer_lower<T: PartialOrd>(best: &mut Option<(u8, T)>, direction: u8, value: T) {
    if best.as_ref().is_none_or(|(_, b)| value < *b) {
        *best = Some((direction, value));
    }
}

/// Classify the voxel at `index`
///
/// A neighbor already holding a region id takes priority over any lower
/// neighbor. Among several qualifying neighbors the lowest value wins, and
/// ties go to the first one in neighborhood order.
pub(crate) fn classify<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &EncodedLabelGrid,
    index: usize,
) -> Descent {
    let v = terrain.value(index);
    let mut seeded: Option<(u8, T)> = None;
    let mut lower: Option<(u8, T)> = None;
    let mut has_equal = false;

    for (d, qi) in terrain.neighbors(index) {
        let w = terrain.value(qi);
        if labels.region(qi).is_some() {
            prefer_lower(&mut seeded, d, w);
        } else if w < v {
            prefer_lower(&mut lower, d, w);
        } else if w == v {
            has_equal = true;
        }
    }

    match seeded.or(lower) {
        Some((d, _)) => Descent::Direction(d),
        None if has_equal => Descent::Plateau,
        None => Descent::Minimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::{ConnectivityType, Neighborhood};
    use rainshed_core::{Point3, Voxels};

    fn classify_at(rows: &[[u8; 3]], labels: &EncodedLabelGrid, x: u32, y: u32) -> Descent {
        let grid = Voxels::from_rows(rows).unwrap();
        let terrain = Terrain::new(
            &grid,
            None,
            Neighborhood::planar(ConnectivityType::EightWay),
        );
        classify(&terrain, labels, grid.extent().index_of(Point3::new_2d(x, y)))
    }

    fn empty_labels() -> EncodedLabelGrid {
        EncodedLabelGrid::new(rainshed_core::Extent::new_2d(3, 3).unwrap())
    }

    #[test]
    fn test_steepest_neighbor_chosen() {
        let rows = [[5, 5, 5], [3, 9, 5], [5, 5, 1]];
        // Direction 7 is (1, 1) in the 8-neighborhood
        assert_eq!(
            classify_at(&rows, &empty_labels(), 1, 1),
            Descent::Direction(7)
        );
    }

    #[test]
    fn test_ties_go_to_first_direction() {
        let rows = [[2, 9, 2], [9, 9, 9], [2, 9, 2]];
        assert_eq!(
            classify_at(&rows, &empty_labels(), 1, 1),
            Descent::Direction(0)
        );
    }

    #[test]
    fn test_plateau_and_minimum() {
        let flat = [[4, 4, 4], [4, 4, 4], [4, 4, 4]];
        assert_eq!(classify_at(&flat, &empty_labels(), 1, 1), Descent::Plateau);

        let pit = [[4, 4, 4], [4, 0, 4], [4, 4, 4]];
        assert_eq!(classify_at(&pit, &empty_labels(), 1, 1), Descent::Minimum);
    }

    #[test]
    fn test_region_neighbor_takes_priority() {
        let rows = [[0, 9, 9], [9, 5, 9], [9, 9, 7]];
        let mut labels = empty_labels();
        labels.set_region(8, 8);
        // The seeded neighbor wins even though (0, 0) is lower
        assert_eq!(classify_at(&rows, &labels, 1, 1), Descent::Direction(7));
    }

    #[test]
    fn test_single_voxel_grid_is_minimum() {
        let grid = Voxels::from_rows(&[[3u8]]).unwrap();
        let terrain = Terrain::new(&grid, None, Neighborhood::full_3d());
        let labels = EncodedLabelGrid::new(grid.extent());
        assert_eq!(classify(&terrain, &labels, 0), Descent::Minimum);
    }

    #[test]
    fn test_masked_neighbors_ignored() {
        let grid = Voxels::from_rows(&[[5u8, 1, 5]]).unwrap();
        let mask = Voxels::from_data(grid.extent(), vec![true, false, true]).unwrap();
        let terrain = Terrain::new(
            &grid,
            Some(&mask),
            Neighborhood::planar(ConnectivityType::FourWay),
        );
        let labels = EncodedLabelGrid::new(grid.extent());
        assert_eq!(classify(&terrain, &labels, 0), Descent::Minimum);
    }
}
