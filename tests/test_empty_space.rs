mod common;

use image::GenericImageView;
use shelfcount::{EmptySpaceConfig, EmptySpaceDetector};

#[test]
fn blank_shelf_is_a_single_empty_region() {
    let result = EmptySpaceDetector::new()
        .detect(&common::blank_shelf(240, 120))
        .unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(result.regions.len(), 1);
}

#[test]
fn objects_carve_out_empty_regions() {
    // A row of solid objects leaves empty shelf area around them.
    let img = common::six_touching_squares();
    let result = EmptySpaceDetector::new().detect(&img).unwrap();

    assert!(result.count >= 1);
    assert_eq!(result.annotated.dimensions(), img.dimensions());
}

#[test]
fn detection_is_independent_of_the_object_counter() {
    // Same image through both pipelines; neither disturbs the other.
    let img = common::five_circles();
    let empty_before = EmptySpaceDetector::new().detect(&img).unwrap();
    let _objects = shelfcount::ObjectCounter::new().count(&img).unwrap();
    let empty_after = EmptySpaceDetector::new().detect(&img).unwrap();

    assert_eq!(empty_before.count, empty_after.count);
    assert_eq!(empty_before.regions, empty_after.regions);
}

#[test]
fn custom_parameters_are_honored() {
    // A coarser closing merges occupied regions more aggressively, which can
    // only reduce or keep the number of empty regions it separates.
    let img = common::four_polygons();

    let fine = EmptySpaceDetector::new()
        .with_config(EmptySpaceConfig {
            closing_radius: 1,
            ..EmptySpaceConfig::default()
        })
        .detect(&img)
        .unwrap();
    let coarse = EmptySpaceDetector::new()
        .with_config(EmptySpaceConfig {
            closing_radius: 12,
            ..EmptySpaceConfig::default()
        })
        .detect(&img)
        .unwrap();

    assert!(coarse.count <= fine.count);
}

#[test]
fn annotated_image_can_be_saved() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("empty_spaces.png");

    let result = EmptySpaceDetector::new().detect(&common::blank_shelf(160, 90))?;
    result.annotated.save(&path)?;

    assert!(path.exists());
    Ok(())
}
