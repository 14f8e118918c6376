//! Error types for the test framework

use thiserror::Error;

/// Errors reported by the partition and fixture checks
#[derive(Debug, Error)]
pub enum TestError {
    /// Two objects claim the same voxel
    #[error("voxel ({x}, {y}, {z}) is covered by objects {first} and {second}")]
    Overlap {
        x: u32,
        y: u32,
        z: u32,
        first: usize,
        second: usize,
    },

    /// An in-mask voxel belongs to no object
    #[error("voxel ({x}, {y}, {z}) is not covered by any object")]
    Uncovered { x: u32, y: u32, z: u32 },

    /// An object covers a voxel outside the grid or the mask
    #[error("object {object} covers voxel ({x}, {y}, {z}) outside the mask")]
    OutsideMask {
        object: usize,
        x: u32,
        y: u32,
        z: u32,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rainshed_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
