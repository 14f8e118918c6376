//! Plateau discovery and lower completion
//!
//! A plateau is a maximal connected set of voxels sharing one value. It is
//! flood-filled with an explicit stack, then every voxel is given a
//! direction leading off the plateau, or the whole plateau is declared a
//! minimum when no exit exists.
//!
//! A plateau voxel is an edge point when one of its neighbors can carry the
//! flow away. In priority order:
//!
//! 1. a neighbor holding a region id (lowest value, then first direction),
//! 2. a strictly lower neighbor (lowest value, then first direction),
//! 3. an equal-valued neighbor that was already given a direction by the
//!    steepest-descent pass (first direction).
//!
//! Voxels with none of these are inner points. Inner points are resolved in
//! breadth-first waves starting from the edge points, each pointing back at
//! the voxel it was reached from.

use super::encoding::EncodedLabelGrid;
use super::minima::MinimaStore;
use super::steepest::prefer_lower;
use super::terrain::Terrain;
use crate::error::{RegionError, RegionResult};
use std::mem;

/// Shape of a discovered plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlateauClass {
    /// Every voxel has an exit
    OnlyEdge,
    /// No voxel has an exit; the plateau is a minimum
    OnlyInner,
    /// Some voxels have exits, the rest drain through them
    Mixed,
}

#[derive(Debug, Clone, Copy)]
struct EdgePoint {
    index: usize,
    direction: u8,
}

#[derive(Debug, Default)]
struct Plateau {
    edges: Vec<EdgePoint>,
    inner: Vec<usize>,
}

impl Plateau {
    fn classify(&self) -> PlateauClass {
        match (self.edges.is_empty(), self.inner.is_empty()) {
            (false, true) => PlateauClass::OnlyEdge,
            (true, _) => PlateauClass::OnlyInner,
            (false, false) => PlateauClass::Mixed,
        }
    }

    fn len(&self) -> usize {
        self.edges.len() + self.inner.len()
    }
}

/// Discover and lower-complete the plateau containing `start`
///
/// On return no voxel of the plateau is left unvisited or temporarily
/// marked. Returns the plateau class and its size.
///
/// # Errors
///
/// Returns [`RegionError::InvariantViolation`] if an inner voxel could not
/// be reached from any exit.
pub(crate) fn resolve_plateau<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &mut EncodedLabelGrid,
    minima: Option<&mut MinimaStore>,
    start: usize,
) -> RegionResult<(PlateauClass, usize)> {
    let plateau = discover(terrain, labels, start);
    let class = plateau.classify();
    log::trace!(
        "plateau at {:?}: {} voxels, {} edge, {} inner, {:?}",
        terrain.extent().point_at(start),
        plateau.len(),
        plateau.edges.len(),
        plateau.inner.len(),
        class
    );

    for edge in &plateau.edges {
        labels.set_direction(edge.index, edge.direction);
    }

    match class {
        PlateauClass::OnlyEdge => {}
        PlateauClass::OnlyInner => {
            labels.set_minimum(start);
            propagate_inward(terrain, labels, vec![start]);
            if let Some(store) = minima {
                let extent = terrain.extent();
                store.add(plateau.inner.iter().map(|&i| extent.point_at(i)).collect());
            }
        }
        PlateauClass::Mixed => {
            let frontier = plateau.edges.iter().map(|e| e.index).collect();
            propagate_inward(terrain, labels, frontier);
        }
    }

    if let Some(&stray) = plateau.inner.iter().find(|&&i| labels.is_visited(i)) {
        return Err(RegionError::InvariantViolation(format!(
            "plateau voxel {:?} left unresolved",
            terrain.extent().point_at(stray)
        )));
    }

    Ok((class, plateau.len()))
}

/// Flood-fill the plateau, marking every member visited
fn discover<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &mut EncodedLabelGrid,
    start: usize,
) -> Plateau {
    let v = terrain.value(start);
    let mut plateau = Plateau::default();
    let mut stack = vec![start];
    labels.mark_visited(start);

    while let Some(index) = stack.pop() {
        let mut seeded: Option<(u8, T)> = None;
        let mut lower: Option<(u8, T)> = None;
        let mut drain: Option<u8> = None;

        for (d, qi) in terrain.neighbors(index) {
            let w = terrain.value(qi);
            if labels.region(qi).is_some() {
                prefer_lower(&mut seeded, d, w);
            } else if w < v {
                prefer_lower(&mut lower, d, w);
            } else if w == v {
                if labels.is_unvisited(qi) {
                    labels.mark_visited(qi);
                    stack.push(qi);
                } else if drain.is_none() && labels.direction(qi).is_some() {
                    drain = Some(d);
                }
            }
        }

        match seeded.or(lower).map(|(d, _)| d).or(drain) {
            Some(direction) => plateau.edges.push(EdgePoint { index, direction }),
            None => plateau.inner.push(index),
        }
    }

    plateau
}

/// Resolve visited voxels in waves outward from `frontier`
///
/// Each newly reached voxel points back at the frontier member that reached
/// it; only voxels still marked visited are entered.
fn propagate_inward<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &mut EncodedLabelGrid,
    mut frontier: Vec<usize>,
) {
    let neighborhood = terrain.neighborhood();
    let mut next = Vec::new();

    while !frontier.is_empty() {
        for &from in &frontier {
            for (d, qi) in terrain.neighbors(from) {
                if labels.is_visited(qi) {
                    labels.set_direction(qi, neighborhood.opposite(d));
                    next.push(qi);
                }
            }
        }
        frontier.clear();
        mem::swap(&mut frontier, &mut next);
    }
}
