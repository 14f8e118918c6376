//! rainshed-test - Regression test framework for rainshed
//!
//! This crate provides the regression test harness used by the integration
//! tests, together with synthetic terrain fixtures and partition checks.
//!
//! Checks are recorded rather than panicking, so one run reports every
//! mismatch:
//!
//! - **Compare**: Check results against expected values (default)
//! - **Display**: Also print every label grid that is compared
//!
//! # Usage
//!
//! ```ignore
//! use rainshed_test::RegParams;
//!
//! let mut rp = RegParams::new("watershed");
//! rp.compare_values(2.0, objects.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rainshed_core::{BinaryVoxels, BoundingBox, Extent, Point3, Voxels};

/// Render a label grid as text
///
/// Rows are space-separated values, one line per row; slices are separated
/// by an empty line.
pub fn format_labels(labels: &Voxels<u32>) -> String {
    let extent = labels.extent();
    let (w, h, d) = extent.dimensions();
    let mut out = String::new();
    for z in 0..d {
        if z > 0 {
            out.push('\n');
        }
        for y in 0..h {
            let row: Vec<String> = (0..w)
                .map(|x| {
                    labels
                        .get_index(extent.index_of(Point3::new(x, y, z)))
                        .to_string()
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
    }
    out
}

/// Create a smooth synthetic terrain with several basins
///
/// Two variants with different sin/cos frequencies are available; depth 1
/// gives a 2D grid.
pub fn synthetic_terrain(
    width: u32,
    height: u32,
    depth: u32,
    variant: u32,
) -> TestResult<Voxels<f32>> {
    let extent = Extent::new(width, height, depth)?;
    let (a, b, c) = if variant == 0 {
        (0.438f32, 0.561f32, 0.327f32)
    } else {
        (0.238f32, 0.261f32, 0.207f32)
    };
    Ok(Voxels::from_fn(extent, |p| {
        let (x, y, z) = (p.x as f32, p.y as f32, p.z as f32);
        128.0
            + 26.3 * (a * y).sin()
            + 18.6 * (b * x).sin()
            + 23.6 * (c * x).cos()
            + 11.0 * (a * z).cos()
    }))
}

/// Create a grid whose value is the squared distance to `center`
pub fn bowl(extent: Extent, center: Point3) -> Voxels<u32> {
    Voxels::from_fn(extent, |p| {
        let dx = p.x.abs_diff(center.x);
        let dy = p.y.abs_diff(center.y);
        let dz = p.z.abs_diff(center.z);
        dx * dx + dy * dy + dz * dz
    })
}

/// Check that objects partition the in-mask voxels of a grid
///
/// Each object is given as its bounding box and box-relative mask. Every
/// in-mask voxel must be covered by exactly one object, and no object may
/// cover a voxel outside the grid or the mask.
///
/// # Returns
///
/// The number of covered voxels.
///
/// # Errors
///
/// Returns the first overlap, uncovered voxel or out-of-mask voxel found.
pub fn check_partition<'a, I>(
    extent: Extent,
    mask: Option<&BinaryVoxels>,
    objects: I,
) -> TestResult<usize>
where
    I: IntoIterator<Item = (&'a BoundingBox, &'a BinaryVoxels)>,
{
    let mut owner: Vec<Option<usize>> = vec![None; extent.len()];
    let in_mask = |p: Point3| mask.is_none_or(|m| m.is_on(p));

    for (k, (bounds, object_mask)) in objects.into_iter().enumerate() {
        for rel in object_mask.points_on() {
            let p = bounds.to_global(rel);
            if !extent.contains(p) || !in_mask(p) {
                return Err(TestError::OutsideMask {
                    object: k,
                    x: p.x,
                    y: p.y,
                    z: p.z,
                });
            }
            let slot = &mut owner[extent.index_of(p)];
            if let Some(first) = *slot {
                return Err(TestError::Overlap {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                    first,
                    second: k,
                });
            }
            *slot = Some(k);
        }
    }

    let mut covered = 0;
    for p in extent.points() {
        match (in_mask(p), owner[extent.index_of(p)]) {
            (true, None) => {
                return Err(TestError::Uncovered {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                });
            }
            (true, Some(_)) => covered += 1,
            (false, _) => {}
        }
    }
    Ok(covered)
}
