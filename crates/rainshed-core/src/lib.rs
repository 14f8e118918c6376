//! Rainshed Core - Basic data structures for voxel segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the rainshed segmentation library:
//!
//! - [`Extent`] / [`Point3`] - Grid shape and voxel coordinates
//! - [`Voxels`] / [`BinaryVoxels`] - Dense voxel buffers and masks
//! - [`BoundingBox`] - Axis-aligned voxel regions

pub mod bounding;
pub mod error;
pub mod extent;
pub mod voxels;

pub use bounding::BoundingBox;
pub use error::{Error, Result};
pub use extent::{Extent, Point3};
pub use voxels::{BinaryVoxels, Voxels};
