//! rainshed-region - Region segmentation for rainshed
//!
//! This crate provides region processing over voxel grids:
//!
//! - **Neighborhoods** - Fixed-order 4-, 8- and 26-neighborhoods and
//!   connectivity checks for point sets
//! - **Watershed segmentation** - Rainfall (steepest-descent) watershed with
//!   seeds, masks and plateau handling
//! - **Local minima** - The minima the segmentation drains into
//!
//! # Examples
//!
//! ## Segmenting a 2D grid
//!
//! ```
//! use rainshed_core::Voxels;
//! use rainshed_region::{WatershedOptions, watershed_segmentation};
//!
//! let grid = Voxels::from_rows(&[[0u8, 1, 2, 3, 2, 1, 0]]).unwrap();
//! let objects = watershed_segmentation(&grid, None, &[], &WatershedOptions::default()).unwrap();
//! assert_eq!(objects.len(), 2);
//! assert_eq!(objects[0].voxel_count() + objects[1].voxel_count(), 7);
//! ```
//!
//! ## Seeding a region
//!
//! ```
//! use rainshed_core::{Point3, Voxels};
//! use rainshed_region::{Seed, WatershedOptions, watershed_segmentation};
//!
//! let grid = Voxels::from_rows(&[[0u8, 4, 8, 4, 0]]).unwrap();
//! let seed = Seed::new(vec![Point3::new_2d(2, 0)]);
//! let objects =
//!     watershed_segmentation(&grid, None, &[seed], &WatershedOptions::default()).unwrap();
//! assert!(objects.iter().any(|o| o.contains(Point3::new_2d(2, 0))));
//! ```

pub mod conncomp;
pub mod error;
pub mod watershed;

// Re-export core types
pub use rainshed_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{ConnectivityType, Neighborhood, count_components, is_single_connected};

// Re-export watershed types and functions
pub use watershed::{
    LabeledObject, Seed, WatershedOptions, find_local_minima, watershed_labels,
    watershed_segmentation,
};
