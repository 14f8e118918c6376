//! Rainshed - Rainfall watershed segmentation for Rust
//!
//! # Overview
//!
//! Rainshed partitions a scalar 2D or 3D voxel grid into disjoint regions
//! by following steepest descent from every voxel to a local minimum:
//!
//! - Voxel grids, masks and bounding boxes
//! - Optional containing mask and pre-labeled seed regions
//! - Plateau lower completion
//! - Early exit returning the local minima only
//!
//! # Example
//!
//! ```
//! use rainshed::Voxels;
//! use rainshed::region::{WatershedOptions, watershed_segmentation};
//!
//! let grid = Voxels::from_rows(&[[3u8, 1, 3, 0, 3]]).unwrap();
//! let objects = watershed_segmentation(&grid, None, &[], &WatershedOptions::default()).unwrap();
//! assert_eq!(objects.len(), 2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rainshed_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rainshed_region as region;
