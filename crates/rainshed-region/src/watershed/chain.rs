//! Direction chain resolution
//!
//! After the first pass every in-mask voxel holds a direction, a region id
//! or a minimum marker. This second pass follows each chain of directions
//! to its terminal voxel and writes that terminal's raw id along the whole
//! path. A minimum anchor becomes a region whose raw id is its own linear
//! offset.

use super::encoding::{EncodedLabelGrid, LabelState};
use super::terrain::Terrain;
use crate::error::{RegionError, RegionResult};

/// Collapse every direction chain into a raw region id
///
/// # Errors
///
/// Returns [`RegionError::InvariantViolation`] if a chain reaches a voxel
/// that was never resolved, leaves the mask, or loops.
pub(crate) fn resolve_chains<T: Copy + PartialOrd>(
    terrain: &Terrain<'_, T>,
    labels: &mut EncodedLabelGrid,
) -> RegionResult<()> {
    let len = labels.extent().len();
    let mut path = Vec::new();

    for start in 0..len {
        if !terrain.in_mask(start) || labels.region(start).is_some() {
            continue;
        }

        path.clear();
        let mut current = start;
        let id = loop {
            match labels.state(current) {
                LabelState::Region(id) => break id,
                LabelState::Minimum => {
                    labels.set_region(current, current as u32);
                    break current as u32;
                }
                LabelState::Direction(d) => {
                    path.push(current);
                    if path.len() > len {
                        return Err(unresolved(terrain, start, "direction cycle"));
                    }
                    current = terrain
                        .step(current, d)
                        .ok_or_else(|| unresolved(terrain, current, "direction leaves mask"))?;
                }
                LabelState::Unvisited | LabelState::Visited => {
                    return Err(unresolved(terrain, current, "chain reaches unresolved voxel"));
                }
            }
        };

        for &i in &path {
            labels.set_region(i, id);
        }
    }

    Ok(())
}

fn unresolved<T: Copy + PartialOrd>(terrain: &Terrain<'_, T>, index: usize, what: &str) -> RegionError {
    RegionError::InvariantViolation(format!(
        "{} at {:?}",
        what,
        terrain.extent().point_at(index)
    ))
}
