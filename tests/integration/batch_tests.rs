//! Batch driver tests.
//!
//! The key property: one bad image never prevents sibling images from
//! producing complete, descriptor-backed pyramids.

use std::fs;

use dzi_tiler::{run_batch, BatchError, BatchOptions};

use super::test_utils::write_image;

#[test]
fn test_batch_mixed_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();

    write_image(&input, "first.png", 64, 64);
    write_image(&input, "second.jpg", 100, 50);
    fs::write(input.join("broken.jpg"), b"definitely not a jpeg").unwrap();
    fs::write(input.join("notes.txt"), b"not an image, skipped").unwrap();

    let out = dir.path().join("out");
    let report = run_batch(&input, &out, &BatchOptions::default()).unwrap();
    let summary = report.summary();

    // The text file is skipped entirely; the corrupt JPEG counts as failed
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    // Valid siblings completed with descriptors
    assert!(out.join("first.dzi").exists());
    assert!(out.join("first_files").is_dir());
    assert!(out.join("second.dzi").exists());

    // The failed image has no descriptor, so no valid pyramid
    assert!(!out.join("broken.dzi").exists());
}

#[test]
fn test_batch_outcomes_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();

    write_image(&input, "b.png", 8, 8);
    write_image(&input, "a.png", 8, 8);
    write_image(&input, "c.png", 8, 8);

    let out = dir.path().join("out");
    let report = run_batch(&input, &out, &BatchOptions::default()).unwrap();

    let names: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| o.source.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.png", "b.png", "c.png"]);
}

#[test]
fn test_batch_with_bounded_workers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();

    for i in 0..4 {
        write_image(&input, &format!("img{i}.png"), 64, 32);
    }

    let out = dir.path().join("out");
    let options = BatchOptions {
        workers: Some(2),
        ..BatchOptions::default()
    };
    let summary = run_batch(&input, &out, &options).unwrap().summary();

    assert_eq!(summary.succeeded, 4);
    for i in 0..4 {
        assert!(out.join(format!("img{i}.dzi")).exists());
    }
}

#[test]
fn test_batch_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();

    let out = dir.path().join("out");
    let summary = run_batch(&input, &out, &BatchOptions::default())
        .unwrap()
        .summary();

    assert_eq!(summary.total, 0);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_batch_missing_source_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_batch(
        &dir.path().join("nope"),
        &dir.path().join("out"),
        &BatchOptions::default(),
    );

    assert!(matches!(result, Err(BatchError::SourceDir { .. })));
}

#[test]
fn test_batch_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    write_image(&input, "img.png", 16, 16);

    // Nested, nonexistent output root
    let out = dir.path().join("a").join("b").join("out");
    let summary = run_batch(&input, &out, &BatchOptions::default())
        .unwrap()
        .summary();

    assert_eq!(summary.succeeded, 1);
    assert!(out.join("img.dzi").exists());
}
