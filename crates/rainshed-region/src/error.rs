//! Error types for rainshed-region

use thiserror::Error;

/// Errors that can occur during segmentation
///
/// Every variant aborts the whole call; no partial result is returned.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rainshed_core::Error),

    /// A seed does not form exactly one connected component
    #[error("seed {seed} is not single-connected: found {components} components")]
    SeedNotSingleConnected { seed: usize, components: usize },

    /// Two seeds claim the same in-mask voxel
    #[error("seeds {first} and {second} share a voxel")]
    SeedsOverlap { first: usize, second: usize },

    /// A seed voxel lies outside the intensity grid
    #[error("seed {seed} has a voxel outside the grid: ({x}, {y}, {z})")]
    SeedOutOfBounds { seed: usize, x: u32, y: u32, z: u32 },

    /// Containing mask shape differs from the intensity grid
    #[error("containing mask shape mismatch: expected {}x{}x{}, got {}x{}x{}", .expected.0, .expected.1, .expected.2, .actual.0, .actual.1, .actual.2)]
    MaskShapeMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    /// Internal invariant broken; indicates a logic defect
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl RegionError {
    /// Whether the failure was caused by invalid input rather than a defect
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RegionError::SeedNotSingleConnected { .. }
                | RegionError::SeedsOverlap { .. }
                | RegionError::SeedOutOfBounds { .. }
                | RegionError::MaskShapeMismatch { .. }
        )
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
