//! Accumulator of discovered local minima
//!
//! Only populated when the caller asks for minima, either through early-exit
//! mode or [`find_local_minima`](super::find_local_minima).

use rainshed_core::Point3;

#[derive(Debug, Default)]
pub(crate) struct MinimaStore {
    minima: Vec<Vec<Point3>>,
}

impl MinimaStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a single-voxel minimum
    pub(crate) fn add_point(&mut self, p: Point3) {
        self.minima.push(vec![p]);
    }

    /// Record a minimum made of several connected voxels
    pub(crate) fn add(&mut self, points: Vec<Point3>) {
        debug_assert!(!points.is_empty());
        self.minima.push(points);
    }

    pub(crate) fn len(&self) -> usize {
        self.minima.len()
    }

    pub(crate) fn into_minima(self) -> Vec<Vec<Point3>> {
        self.minima
    }
}
