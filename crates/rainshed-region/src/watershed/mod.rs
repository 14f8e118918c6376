//! Rainfall watershed segmentation
//!
//! This module partitions a scalar voxel grid into disjoint regions by
//! following steepest descent from every voxel to a local minimum. Seed
//! regions supplied by the caller are labeled first and capture any flow
//! that reaches them. Flat plateaus are lower-completed, so every plateau
//! voxel either drains off the plateau or belongs to a plateau minimum.
//!
//! The call runs in a fixed sequence over one label grid:
//!
//! 1. mark seeds,
//! 2. one raster pass classifying each unvisited voxel (descent direction,
//!    plateau, or single-voxel minimum),
//! 3. chain resolution turning directions into region ids,
//! 4. object extraction.
//!
//! In early-exit mode steps 3 and 4 are replaced by building one object per
//! minimum found in step 2.
//!
//! No watershed-line voxels are kept: adjacent regions touch directly.

mod chain;
mod encoding;
mod extract;
mod minima;
mod plateau;
mod seeds;
mod steepest;
mod terrain;

pub use extract::LabeledObject;
pub use seeds::Seed;

use crate::conncomp::{ConnectivityType, Neighborhood};
use crate::error::RegionResult;
use encoding::EncodedLabelGrid;
use minima::MinimaStore;
use plateau::PlateauClass;
use rainshed_core::{BinaryVoxels, Point3, Voxels};
use steepest::Descent;
use terrain::Terrain;

/// Options for watershed segmentation
#[derive(Debug, Clone)]
pub struct WatershedOptions {
    /// Use the 26-neighborhood when the grid has more than one slice
    pub process_3d: bool,
    /// In-plane connectivity when 3D processing is off or the grid is flat
    pub planar_connectivity: ConnectivityType,
    /// Return one object per local minimum instead of the full partition
    pub exit_with_minima: bool,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            process_3d: true,
            planar_connectivity: ConnectivityType::FourWay,
            exit_with_minima: false,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the 26-neighborhood for multi-slice grids
    pub fn with_3d(mut self, process_3d: bool) -> Self {
        self.process_3d = process_3d;
        self
    }

    /// Set the in-plane connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.planar_connectivity = connectivity;
        self
    }

    /// Return minima as objects instead of the segmented regions
    pub fn with_exit_with_minima(mut self, exit: bool) -> Self {
        self.exit_with_minima = exit;
        self
    }

    /// Neighborhood used for a grid of this shape
    pub fn neighborhood(&self, extent: rainshed_core::Extent) -> Neighborhood {
        Neighborhood::for_extent(extent, self.process_3d, self.planar_connectivity)
    }
}

/// Counters for one descent pass
#[derive(Debug, Default)]
struct PassStats {
    directions: usize,
    single_minima: usize,
    only_edge: usize,
    only_inner: usize,
    mixed: usize,
    plateau_voxels: usize,
}

/// Label grid after seeds and the descent pass
struct FirstPass<'a, T> {
    terrain: Terrain<'a, T>,
    labels: EncodedLabelGrid,
    minima: Option<MinimaStore>,
}

/// Mark seeds and run the steepest-descent raster pass
fn first_pass<'a, T: Copy + PartialOrd>(
    grid: &'a Voxels<T>,
    mask: Option<&'a BinaryVoxels>,
    seeds: &[Seed],
    options: &WatershedOptions,
    collect_minima: bool,
) -> RegionResult<FirstPass<'a, T>> {
    let extent = grid.extent();
    let neighborhood = options.neighborhood(extent);
    let mut labels = EncodedLabelGrid::new(extent);
    let mut minima = collect_minima.then(MinimaStore::new);

    terrain::check_mask(grid, mask)?;
    let marked = seeds::apply_seeds(seeds, &mut labels, minima.as_mut(), mask, &neighborhood)?;

    let terrain = Terrain::new(grid, mask, neighborhood);
    log::debug!(
        "watershed: grid {:?}, {} neighbors, {} of {} seeds marked",
        extent.dimensions(),
        terrain.neighborhood().len(),
        marked,
        seeds.len()
    );

    let mut stats = PassStats::default();
    for index in 0..extent.len() {
        if !terrain.in_mask(index) || !labels.is_unvisited(index) {
            continue;
        }
        match steepest::classify(&terrain, &labels, index) {
            Descent::Direction(d) => {
                labels.set_direction(index, d);
                stats.directions += 1;
            }
            Descent::Minimum => {
                labels.set_minimum(index);
                if let Some(store) = minima.as_mut() {
                    store.add_point(extent.point_at(index));
                }
                stats.single_minima += 1;
            }
            Descent::Plateau => {
                let (class, size) =
                    plateau::resolve_plateau(&terrain, &mut labels, minima.as_mut(), index)?;
                match class {
                    PlateauClass::OnlyEdge => stats.only_edge += 1,
                    PlateauClass::OnlyInner => stats.only_inner += 1,
                    PlateauClass::Mixed => stats.mixed += 1,
                }
                stats.plateau_voxels += size;
            }
        }
    }

    log::debug!(
        "watershed: {} descents, {} single-voxel minima, plateaus {} edge / {} inner / {} mixed ({} voxels), {} minima recorded",
        stats.directions,
        stats.single_minima,
        stats.only_edge,
        stats.only_inner,
        stats.mixed,
        stats.plateau_voxels,
        minima.as_ref().map_or(0, MinimaStore::len)
    );

    Ok(FirstPass {
        terrain,
        labels,
        minima,
    })
}

/// Run the full pipeline, returning objects and the compact label grid
fn segment<T: Copy + PartialOrd>(
    grid: &Voxels<T>,
    mask: Option<&BinaryVoxels>,
    seeds: &[Seed],
    options: &WatershedOptions,
) -> RegionResult<(Vec<LabeledObject>, Voxels<u32>)> {
    let FirstPass {
        terrain,
        mut labels,
        ..
    } = first_pass(grid, mask, seeds, options, false)?;
    chain::resolve_chains(&terrain, &mut labels)?;
    let (objects, compact) = extract::extract_objects(&terrain, &labels)?;
    log::debug!("watershed: {} objects", objects.len());
    Ok((objects, compact))
}

/// Perform rainfall watershed segmentation on a voxel grid
///
/// # Arguments
///
/// * `grid` - Intensity values; 2D grids have depth 1
/// * `mask` - Optional containing mask of the same shape; voxels outside it
///   are never visited and never belong to an object
/// * `seeds` - Pre-labeled connected regions, each yielding one object
/// * `options` - Neighborhood and early-exit options
///
/// # Returns
///
/// In normal mode, disjoint objects covering every in-mask voxel exactly
/// once, in order of their first voxel in raster order. In early-exit mode
/// (`options.exit_with_minima`), one object per local minimum, including
/// the anchor voxel of each seed, in discovery order.
///
/// Values that are not comparable (such as NaN) are never equal to or
/// lower than anything, so such voxels become single-voxel minima.
///
/// # Errors
///
/// * [`RegionError::MaskShapeMismatch`](crate::RegionError::MaskShapeMismatch)
///   if the mask shape differs from the grid
/// * [`RegionError::SeedNotSingleConnected`](crate::RegionError::SeedNotSingleConnected)
///   or [`RegionError::SeedOutOfBounds`](crate::RegionError::SeedOutOfBounds)
///   for an invalid seed
/// * [`RegionError::InvariantViolation`](crate::RegionError::InvariantViolation)
///   on an internal logic defect
///
/// # Examples
///
/// ```
/// use rainshed_core::Voxels;
/// use rainshed_region::{WatershedOptions, watershed_segmentation};
///
/// let grid = Voxels::from_rows(&[
///     [0u8, 1, 2, 1, 0],
///     [1, 2, 3, 2, 1],
/// ])
/// .unwrap();
/// let objects = watershed_segmentation(&grid, None, &[], &WatershedOptions::default()).unwrap();
/// assert_eq!(objects.len(), 2);
/// ```
pub fn watershed_segmentation<T: Copy + PartialOrd>(
    grid: &Voxels<T>,
    mask: Option<&BinaryVoxels>,
    seeds: &[Seed],
    options: &WatershedOptions,
) -> RegionResult<Vec<LabeledObject>> {
    if options.exit_with_minima {
        let minima = collect_minima(grid, mask, seeds, options)?;
        log::debug!("watershed: early exit with {} minima", minima.len());
        return extract::objects_from_minima(&minima);
    }
    segment(grid, mask, seeds, options).map(|(objects, _)| objects)
}

/// Segment a voxel grid and return a compact label grid
///
/// Voxels outside the mask are 0; voxels of object `k` (in the order
/// returned by [`watershed_segmentation`]) are `k + 1`. Early-exit mode is
/// ignored.
pub fn watershed_labels<T: Copy + PartialOrd>(
    grid: &Voxels<T>,
    mask: Option<&BinaryVoxels>,
    seeds: &[Seed],
    options: &WatershedOptions,
) -> RegionResult<Voxels<u32>> {
    segment(grid, mask, seeds, options).map(|(_, compact)| compact)
}

/// Find the local minima of a voxel grid
///
/// Returns the point set of every minimum discovered by the descent pass:
/// single voxels whose neighbors are all higher, and plateaus with no lower
/// exit. Each set drains exactly one region of the full segmentation.
pub fn find_local_minima<T: Copy + PartialOrd>(
    grid: &Voxels<T>,
    mask: Option<&BinaryVoxels>,
    options: &WatershedOptions,
) -> RegionResult<Vec<Vec<Point3>>> {
    collect_minima(grid, mask, &[], options)
}

fn collect_minima<T: Copy + PartialOrd>(
    grid: &Voxels<T>,
    mask: Option<&BinaryVoxels>,
    seeds: &[Seed],
    options: &WatershedOptions,
) -> RegionResult<Vec<Vec<Point3>>> {
    let pass = first_pass(grid, mask, seeds, options, true)?;
    Ok(pass.minima.map(MinimaStore::into_minima).unwrap_or_default())
}
