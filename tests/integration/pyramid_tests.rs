//! End-to-end pyramid generation tests.

use std::fs;

use dzi_tiler::{generate_pyramid, DziDescriptor, PyramidOptions, ZeroLevelPolicy};

use super::test_utils::{
    count_tiles, is_valid_jpeg, level_indices, tile_dimensions, tile_path, write_image,
};

#[test]
fn test_1024x512_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "wide.png", 1024, 512);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let report = generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    // max(1024, 512) = 2^10, so the full-resolution level is index 10; the
    // default policy drops level 0, whose height truncates to zero.
    let tiles_dir = out.join("wide_files");
    assert_eq!(level_indices(&tiles_dir), (1..=10).collect::<Vec<_>>());
    assert_eq!(report.levels, 10);

    // Level 10 is the full 1024x512 raster: a 4x2 grid of full 256x256 tiles
    assert_eq!(count_tiles(&tiles_dir.join("10")), 8);
    for col in 0..4 {
        for row in 0..2 {
            let tile = tile_path(&out, "wide", 10, col, row);
            assert!(tile.exists(), "missing tile {col}_{row}");
            assert_eq!(tile_dimensions(&tile), (256, 256));
        }
    }

    // Level 9 is 512x256: a 2x1 grid
    assert_eq!(count_tiles(&tiles_dir.join("9")), 2);

    // Level 1 is 2x1: a single tile
    assert_eq!(count_tiles(&tiles_dir.join("1")), 1);
    assert_eq!(tile_dimensions(&tile_path(&out, "wide", 1, 0, 0)), (2, 1));

    let descriptor = DziDescriptor::from_xml(&fs::read_to_string(out.join("wide.dzi")).unwrap());
    assert_eq!(descriptor.unwrap(), DziDescriptor::for_source(1024, 512));
}

#[test]
fn test_1024x512_with_clamped_level_zero() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "wide.png", 1024, 512);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let options = PyramidOptions {
        zero_level_policy: ZeroLevelPolicy::ClampToOne,
        ..PyramidOptions::default()
    };
    let report = generate_pyramid(&source, &out, &options).unwrap();

    assert_eq!(report.levels, 11);
    assert_eq!(
        level_indices(&out.join("wide_files")),
        (0..=10).collect::<Vec<_>>()
    );
    assert_eq!(tile_dimensions(&tile_path(&out, "wide", 0, 0, 0)), (1, 1));
}

#[test]
fn test_1x1_source_single_tile() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "dot.png", 1, 1);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let report = generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    assert_eq!(report.levels, 1);
    assert_eq!(report.tiles_written, 1);
    assert_eq!(level_indices(&out.join("dot_files")), vec![0]);

    let tile = tile_path(&out, "dot", 0, 0, 0);
    assert_eq!(tile_dimensions(&tile), (1, 1));
    assert!(is_valid_jpeg(&fs::read(&tile).unwrap()));
}

#[test]
fn test_dimension_divisible_by_tile_size_has_no_truncated_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "square.png", 512, 512);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    // Level 9 is the full 512x512 raster: all four tiles are exactly 256x256
    for col in 0..2 {
        for row in 0..2 {
            let tile = tile_path(&out, "square", 9, col, row);
            assert_eq!(tile_dimensions(&tile), (256, 256));
        }
    }
}

#[test]
fn test_edge_tiles_are_truncated_not_padded() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "odd.png", 1000, 500);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    // Full-resolution level (index 10): 4x2 grid with truncated right/bottom edges
    assert_eq!(tile_dimensions(&tile_path(&out, "odd", 10, 0, 0)), (256, 256));
    assert_eq!(tile_dimensions(&tile_path(&out, "odd", 10, 3, 0)), (232, 256));
    assert_eq!(tile_dimensions(&tile_path(&out, "odd", 10, 0, 1)), (256, 244));
    assert_eq!(tile_dimensions(&tile_path(&out, "odd", 10, 3, 1)), (232, 244));
}

#[test]
fn test_tiles_written_matches_grid_counts() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "img.png", 300, 200);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let report = generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    let tiles_dir = out.join("img_files");
    let mut counted = 0;
    for index in level_indices(&tiles_dir) {
        counted += count_tiles(&tiles_dir.join(index.to_string()));
    }
    assert_eq!(report.tiles_written, counted);
}

#[test]
fn test_all_tiles_are_valid_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "img.png", 300, 300);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();

    let tiles_dir = out.join("img_files");
    for index in level_indices(&tiles_dir) {
        for entry in fs::read_dir(tiles_dir.join(index.to_string())).unwrap() {
            let path = entry.unwrap().path();
            let data = fs::read(&path).unwrap();
            assert!(is_valid_jpeg(&data), "{} is not a JPEG", path.display());
        }
    }
}

#[test]
fn test_pixel_limit_rejects_image() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "img.png", 64, 64);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let options = PyramidOptions {
        max_pixels: Some(1000),
        ..PyramidOptions::default()
    };

    assert!(generate_pyramid(&source, &out, &options).is_err());
    assert!(!out.join("img.dzi").exists());
}

#[test]
fn test_jpeg_source_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_image(dir.path(), "photo.jpg", 70, 40);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let report = generate_pyramid(&source, &out, &PyramidOptions::default()).unwrap();
    assert_eq!(report.name, "photo");
    assert!(out.join("photo.dzi").exists());
}
