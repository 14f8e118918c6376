//! Plateau lower-completion regression test
//!
//! Flat regions either drain through their lower rim or become a single
//! minimum. Checks the three plateau shapes on small grids with known
//! outcomes, then a large 3D plateau.
//!
//! Run with:
//! ```
//! cargo test -p rainshed-region --test plateau_reg
//! ```

use rainshed_core::{BinaryVoxels, Extent, Point3, Voxels};
use rainshed_region::{
    WatershedOptions, find_local_minima, watershed_labels, watershed_segmentation,
};
use rainshed_test::{RegParams, check_partition};

/// `size`x`size` square of `inside` centered in a ring of `rim`, one voxel wide
fn sunken_square(size: u32, inside: u8, rim: u8) -> Voxels<u8> {
    let extent = Extent::new_2d(size + 2, size + 2).unwrap();
    Voxels::from_fn(extent, |p| {
        if (1..=size).contains(&p.x) && (1..=size).contains(&p.y) {
            inside
        } else {
            rim
        }
    })
}

fn square_mask(extent: Extent, lo: u32, hi: u32) -> BinaryVoxels {
    Voxels::from_fn(extent, |p| (lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y))
}

#[test]
fn plateau_reg_only_inner() {
    let mut rp = RegParams::new("plateau_only_inner");
    let options = WatershedOptions::default();
    let grid = sunken_square(5, 0, 5);

    // The sunken square is the only minimum; the rim drains into it
    let objects = watershed_segmentation(&grid, None, &[], &options).unwrap();
    rp.compare_values(1.0, objects.len() as f64, 0.0);
    rp.compare_values(49.0, objects[0].voxel_count() as f64, 0.0);

    let minima = find_local_minima(&grid, None, &options).unwrap();
    rp.compare_values(1.0, minima.len() as f64, 0.0);
    rp.compare_values(25.0, minima[0].len() as f64, 0.0);

    // Restricted to the square, one object covers exactly the 5x5 region
    let mask = square_mask(grid.extent(), 1, 5);
    let objects = watershed_segmentation(&grid, Some(&mask), &[], &options).unwrap();
    rp.compare_values(1.0, objects.len() as f64, 0.0);
    let bounds = objects[0].bounds();
    rp.compare_values(1.0, bounds.corner.x as f64, 0.0);
    rp.compare_values(1.0, bounds.corner.y as f64, 0.0);
    rp.compare_values(5.0, bounds.extent.width() as f64, 0.0);
    rp.compare_values(5.0, bounds.extent.height() as f64, 0.0);
    rp.compare_values(25.0, objects[0].voxel_count() as f64, 0.0);

    assert!(rp.cleanup(), "plateau_only_inner regression test failed");
}

#[test]
fn plateau_reg_mixed() {
    let mut rp = RegParams::new("plateau_mixed");
    let options = WatershedOptions::default();

    // Plateau of 3 with a channel of 1 down its left side, 10 elsewhere
    let grid = Voxels::from_rows(&[
        [10u8, 10, 10, 10, 10, 10, 10],
        [1, 3, 3, 3, 3, 3, 10],
        [1, 3, 3, 3, 3, 3, 10],
        [1, 3, 3, 3, 3, 3, 10],
        [10, 10, 10, 10, 10, 10, 10],
    ])
    .unwrap();

    let minima = find_local_minima(&grid, None, &options).unwrap();
    rp.compare_values(1.0, minima.len() as f64, 0.0);
    let mut channel = minima[0].clone();
    channel.sort_by_key(|p| p.y);
    rp.compare_strings(
        format!("{:?}", channel).as_bytes(),
        format!(
            "{:?}",
            vec![Point3::new_2d(0, 1), Point3::new_2d(0, 2), Point3::new_2d(0, 3)]
        )
        .as_bytes(),
    );

    let objects = watershed_segmentation(&grid, None, &[], &options).unwrap();
    rp.compare_values(1.0, objects.len() as f64, 0.0);
    let plateau_in_object = (1..=5)
        .flat_map(|x| (1..=3).map(move |y| Point3::new_2d(x, y)))
        .filter(|&p| objects[0].contains(p))
        .count();
    rp.compare_values(15.0, plateau_in_object as f64, 0.0);

    // Only the plateau and the channel: every plateau voxel still reaches the 1s
    let mask = Voxels::from_fn(grid.extent(), |p| (1..=3).contains(&p.y) && p.x <= 5);
    let labels = watershed_labels(&grid, Some(&mask), &[], &options).unwrap();
    rp.compare_labels(
        "0 0 0 0 0 0 0\n\
         1 1 1 1 1 1 0\n\
         1 1 1 1 1 1 0\n\
         1 1 1 1 1 1 0\n\
         0 0 0 0 0 0 0",
        &labels,
    );

    assert!(rp.cleanup(), "plateau_mixed regression test failed");
}

#[test]
fn plateau_reg_terrace() {
    let mut rp = RegParams::new("plateau_terrace");
    let options = WatershedOptions::default();

    // A flat terrace below a peak drains to its lower side only
    let grid = Voxels::from_rows(&[[0u8, 8, 4, 4, 4, 4, 2, 0]]).unwrap();
    let labels = watershed_labels(&grid, None, &[], &options).unwrap();
    rp.compare_labels("1 1 2 2 2 2 2 2", &labels);

    // Two pits joined by a terrace: the terrace splits by distance to each rim
    let grid = Voxels::from_rows(&[[0u8, 4, 4, 4, 4, 4, 0]]).unwrap();
    let labels = watershed_labels(&grid, None, &[], &options).unwrap();
    rp.compare_labels("1 1 1 1 2 2 2", &labels);

    assert!(rp.cleanup(), "plateau_terrace regression test failed");
}

#[test]
fn plateau_reg_flat_volume() {
    let mut rp = RegParams::new("plateau_flat_volume");

    let extent = Extent::new(48, 40, 12).unwrap();
    let grid = Voxels::new_with_value(extent, 7u16);
    let options = WatershedOptions::default();

    let objects = watershed_segmentation(&grid, None, &[], &options).unwrap();
    rp.compare_values(1.0, objects.len() as f64, 0.0);
    rp.compare_values(extent.len() as f64, objects[0].voxel_count() as f64, 0.0);

    // A masked-out wall splits the flat volume in two
    let mask = Voxels::from_fn(extent, |p| p.x != 24);
    let objects = watershed_segmentation(&grid, Some(&mask), &[], &options).unwrap();
    rp.compare_values(2.0, objects.len() as f64, 0.0);
    let covered = rp.check_result(check_partition(
        extent,
        Some(&mask),
        objects.iter().map(|o| (o.bounds(), o.mask())),
    ));
    rp.compare_values(mask.count_on() as f64, covered.unwrap_or(0) as f64, 0.0);

    assert!(rp.cleanup(), "plateau_flat_volume regression test failed");
}
