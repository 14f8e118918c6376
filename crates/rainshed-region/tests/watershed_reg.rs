//! Watershed segmentation regression test
//!
//! Segments synthetic sin/cos terrains in 2D and 3D and checks:
//! 1. the objects partition the grid
//! 2. the label grid agrees with the objects
//! 3. every object drains exactly one local minimum
//! 4. repeated runs produce identical labels
//!
//! Run with:
//! ```
//! cargo test -p rainshed-region --test watershed_reg
//! ```

use rainshed_core::{Point3, Voxels};
use rainshed_region::{
    ConnectivityType, LabeledObject, WatershedOptions, find_local_minima, watershed_labels,
    watershed_segmentation,
};
use rainshed_test::{RegParams, check_partition, format_labels, synthetic_terrain};

fn partition(grid: &Voxels<f32>, objects: &[LabeledObject]) -> rainshed_test::TestResult<usize> {
    check_partition(
        grid.extent(),
        None,
        objects.iter().map(|o| (o.bounds(), o.mask())),
    )
}

/// Core watershed checks shared by the 2D and 3D terrains
fn do_watershed(rp: &mut RegParams, grid: &Voxels<f32>, options: &WatershedOptions) {
    let objects = watershed_segmentation(grid, None, &[], options).unwrap();
    let labels = watershed_labels(grid, None, &[], options).unwrap();
    let minima = find_local_minima(grid, None, options).unwrap();
    let extent = grid.extent();

    // -- Partition --
    let covered = rp.check_result(partition(grid, &objects));
    rp.compare_values(extent.len() as f64, covered.unwrap_or(0) as f64, 0.0);

    // -- Labels agree with objects --
    for (k, object) in objects.iter().enumerate() {
        let mismatched = object
            .points()
            .into_iter()
            .filter(|&p| labels.get(p) != Some(k as u32 + 1))
            .count();
        rp.compare_values(0.0, mismatched as f64, 0.0);
    }

    // -- One minimum per object --
    rp.compare_values(minima.len() as f64, objects.len() as f64, 0.0);
    let mut owners: Vec<usize> = minima
        .iter()
        .map(|set| {
            objects
                .iter()
                .position(|o| set.iter().all(|&p| o.contains(p)))
                .unwrap_or(usize::MAX)
        })
        .collect();
    owners.sort_unstable();
    owners.dedup();
    rp.compare_values(objects.len() as f64, owners.len() as f64, 0.0);

    // -- Values never rise above the owning minimum's level along a chain,
    //    so each object's lowest value sits on its minimum --
    for set in &minima {
        let level = grid.get(set[0]).unwrap();
        let owner = objects.iter().find(|o| o.contains(set[0])).unwrap();
        let lowest = owner
            .points()
            .into_iter()
            .filter_map(|p| grid.get(p))
            .fold(f32::INFINITY, f32::min);
        rp.compare_values(level as f64, lowest as f64, 0.0);
    }

    // -- Determinism --
    let again = watershed_labels(grid, None, &[], options).unwrap();
    rp.compare_strings(
        format_labels(&labels).as_bytes(),
        format_labels(&again).as_bytes(),
    );
}

#[test]
fn watershed_reg_2d() {
    let mut rp = RegParams::new("watershed_2d");

    let grid = synthetic_terrain(64, 48, 1, 0).unwrap();
    do_watershed(&mut rp, &grid, &WatershedOptions::default());
    do_watershed(
        &mut rp,
        &grid,
        &WatershedOptions::new().with_connectivity(ConnectivityType::EightWay),
    );

    let grid = synthetic_terrain(64, 48, 1, 1).unwrap();
    do_watershed(&mut rp, &grid, &WatershedOptions::default());

    assert!(rp.cleanup(), "watershed_2d regression test failed");
}

#[test]
fn watershed_reg_3d() {
    let mut rp = RegParams::new("watershed_3d");

    let grid = synthetic_terrain(24, 20, 8, 0).unwrap();
    do_watershed(&mut rp, &grid, &WatershedOptions::default());
    // Slices processed with in-plane neighbors only
    do_watershed(&mut rp, &grid, &WatershedOptions::new().with_3d(false));

    assert!(rp.cleanup(), "watershed_3d regression test failed");
}

#[test]
fn watershed_reg_slices_independent_without_3d() {
    let mut rp = RegParams::new("watershed_slices");

    let grid = synthetic_terrain(16, 16, 3, 1).unwrap();
    let options = WatershedOptions::new().with_3d(false);
    let objects = watershed_segmentation(&grid, None, &[], &options).unwrap();

    // No object spans more than one slice
    let spanning = objects
        .iter()
        .filter(|o| o.bounds().extent.depth() != 1)
        .count();
    rp.compare_values(0.0, spanning as f64, 0.0);

    // Each slice on its own segments into the same number of objects
    let mut per_slice = 0;
    for z in 0..3 {
        let slice = Voxels::from_fn(rainshed_core::Extent::new_2d(16, 16).unwrap(), |p| {
            grid.get(Point3::new(p.x, p.y, z)).unwrap()
        });
        per_slice += watershed_segmentation(&slice, None, &[], &options)
            .unwrap()
            .len();
    }
    rp.compare_values(per_slice as f64, objects.len() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_slices regression test failed");
}

#[test]
fn watershed_reg_ramp_labels() {
    let mut rp = RegParams::new("watershed_ramp");

    // Two pits at the ends of each row; the middle column is a ridge
    let grid = Voxels::from_rows(&[
        [0u8, 1, 2, 3, 2, 1, 0],
        [1, 2, 3, 4, 3, 2, 1],
        [2, 3, 4, 5, 4, 3, 2],
    ])
    .unwrap();
    let labels = watershed_labels(&grid, None, &[], &WatershedOptions::default()).unwrap();
    rp.compare_labels(
        "1 1 1 1 2 2 2\n\
         1 1 1 1 2 2 2\n\
         1 1 1 1 2 2 2",
        &labels,
    );

    let min = find_local_minima(&grid, None, &WatershedOptions::default()).unwrap();
    rp.compare_values(2.0, min.len() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_ramp regression test failed");
}

#[test]
fn watershed_reg_3d_diagonal_flow() {
    let mut rp = RegParams::new("watershed_diagonal");

    // The only lower neighbor of the far corner is across the cube diagonal
    let extent = rainshed_core::Extent::new(2, 2, 2).unwrap();
    let grid = Voxels::from_fn(extent, |p| match (p.x, p.y, p.z) {
        (0, 0, 0) => 0u8,
        (1, 1, 1) => 5,
        _ => 9,
    });

    let full = watershed_segmentation(&grid, None, &[], &WatershedOptions::default()).unwrap();
    rp.compare_values(1.0, full.len() as f64, 0.0);

    // With in-plane neighbors only, the corner cannot reach the pit
    let planar =
        watershed_segmentation(&grid, None, &[], &WatershedOptions::new().with_3d(false)).unwrap();
    let corner = planar
        .iter()
        .find(|o| o.contains(Point3::new(1, 1, 1)))
        .unwrap();
    rp.compare_values(0.0, corner.contains(Point3::new(0, 0, 0)) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "watershed_diagonal regression test failed");
}
