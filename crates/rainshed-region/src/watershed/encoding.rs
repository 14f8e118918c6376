//! Per-voxel label state
//!
//! Each voxel of the label grid holds exactly one [`LabelState`]. Region ids
//! and minimum markers are terminal; directions are rewritten only while the
//! plateau they belong to is being resolved, or when chains are collapsed
//! into region ids at the end of the pass.

use rainshed_core::Extent;

/// State of one voxel during segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LabelState {
    /// Not yet examined
    #[default]
    Unvisited,
    /// Flows toward the neighbor with this direction index
    Direction(u8),
    /// Final raw region id
    Region(u32),
    /// Discovered by the plateau currently being flood-filled
    Visited,
    /// Anchor voxel of a local minimum
    Minimum,
}

/// Dense label state store, one entry per voxel in raster order
#[derive(Debug)]
pub(crate) struct EncodedLabelGrid {
    extent: Extent,
    states: Vec<LabelState>,
}

impl EncodedLabelGrid {
    /// Create a grid with every voxel unvisited
    pub(crate) fn new(extent: Extent) -> Self {
        Self {
            extent,
            states: vec![LabelState::Unvisited; extent.len()],
        }
    }

    #[inline]
    pub(crate) fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub(crate) fn state(&self, index: usize) -> LabelState {
        self.states[index]
    }

    #[inline]
    pub(crate) fn is_unvisited(&self, index: usize) -> bool {
        self.states[index] == LabelState::Unvisited
    }

    #[inline]
    pub(crate) fn is_visited(&self, index: usize) -> bool {
        self.states[index] == LabelState::Visited
    }

    #[cfg(test)]
    pub(crate) fn is_minimum(&self, index: usize) -> bool {
        self.states[index] == LabelState::Minimum
    }

    #[inline]
    pub(crate) fn direction(&self, index: usize) -> Option<u8> {
        match self.states[index] {
            LabelState::Direction(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn region(&self, index: usize) -> Option<u32> {
        match self.states[index] {
            LabelState::Region(id) => Some(id),
            _ => None,
        }
    }

    /// Point `index` at one of its neighbors
    #[inline]
    pub(crate) fn set_direction(&mut self, index: usize, direction: u8) {
        debug_assert!(
            matches!(
                self.states[index],
                LabelState::Unvisited | LabelState::Visited
            ),
            "direction written over terminal state {:?}",
            self.states[index]
        );
        self.states[index] = LabelState::Direction(direction);
    }

    /// Assign the final raw region id
    #[inline]
    pub(crate) fn set_region(&mut self, index: usize, id: u32) {
        debug_assert!(
            self.region(index).is_none(),
            "region id written twice at {index}"
        );
        self.states[index] = LabelState::Region(id);
    }

    #[inline]
    pub(crate) fn set_minimum(&mut self, index: usize) {
        debug_assert!(
            matches!(
                self.states[index],
                LabelState::Unvisited | LabelState::Visited
            ),
            "minimum written over {:?}",
            self.states[index]
        );
        self.states[index] = LabelState::Minimum;
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self, index: usize) {
        debug_assert!(self.is_unvisited(index));
        self.states[index] = LabelState::Visited;
    }

    /// Number of voxels currently in `state`
    #[cfg(test)]
    pub(crate) fn count(&self, state: LabelState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}
