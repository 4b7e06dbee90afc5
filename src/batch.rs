//! Batch driver.
//!
//! Scans a source directory, applies the pyramid orchestrator to every
//! supported image, and keeps going past individual failures: one corrupt
//! image never prevents its siblings from producing complete pyramids. The
//! only fatal conditions are an unreadable source directory and an unusable
//! output root.
//!
//! Images are fully independent of each other (each holds its own decoded
//! source and at most one level raster at a time), so the batch fans out on a
//! rayon worker pool. Tile tasks within each image share the same pool.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{BatchError, PyramidError};
use crate::pyramid::{generate_pyramid, PyramidOptions, PyramidReport};

/// Source file extensions accepted by the batch scan (case-insensitive).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp"];

// =============================================================================
// Options & Report
// =============================================================================

/// Settings for one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Per-image generation settings
    pub pyramid: PyramidOptions,

    /// Worker thread count; `None` uses the default pool (one per CPU)
    pub workers: Option<usize>,
}

/// Result of processing one source image.
#[derive(Debug)]
pub struct ImageOutcome {
    /// Path of the source image
    pub source: PathBuf,

    /// The generated pyramid, or the per-image error
    pub result: Result<PyramidReport, PyramidError>,
}

/// Aggregate counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Images that produced a complete, descriptor-backed pyramid
    pub succeeded: usize,

    /// Images that failed anywhere in their pipeline
    pub failed: usize,

    /// Total images processed (skipped non-image files are not counted)
    pub total: usize,
}

/// Per-image outcomes of a finished batch.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per processed image, in source path order
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    /// Derive the success/failure counts.
    pub fn summary(&self) -> BatchSummary {
        let succeeded = self.outcomes.iter().filter(|o| o.result.is_ok()).count();
        BatchSummary {
            succeeded,
            failed: self.outcomes.len() - succeeded,
            total: self.outcomes.len(),
        }
    }
}

// =============================================================================
// Scanning
// =============================================================================

/// Whether `path` has an extension on the supported raster allow-list.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Collect the supported image files of `input_dir`, sorted by path.
fn scan_sources(input_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let entries = fs::read_dir(input_dir).map_err(|source| BatchError::SourceDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::SourceDir {
            path: input_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_file() && is_supported_image(&path) {
            sources.push(path);
        } else if path.is_file() {
            debug!("Skipping non-image file: {}", path.display());
        }
    }

    // Deterministic processing (and reporting) order
    sources.sort();
    Ok(sources)
}

// =============================================================================
// Running
// =============================================================================

/// Process every supported image of `input_dir` into `output_dir`.
///
/// Per-image failures are reported in the returned [`BatchReport`] and do not
/// stop the batch.
///
/// # Errors
///
/// Returns [`BatchError`] only if the source directory cannot be read, the
/// output root cannot be created, or the worker pool cannot be built.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    let sources = scan_sources(input_dir)?;

    fs::create_dir_all(output_dir).map_err(|source| BatchError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    info!(
        "Processing {} image(s) from {}",
        sources.len(),
        input_dir.display()
    );

    let process = |path: &PathBuf| -> ImageOutcome {
        let result = generate_pyramid(path, output_dir, &options.pyramid);
        match &result {
            Ok(report) => info!(
                "{}: {} levels, {} tiles",
                report.name, report.levels, report.tiles_written
            ),
            Err(e) => error!("{}: {}", path.display(), e),
        }
        ImageOutcome {
            source: path.clone(),
            result,
        }
    };

    let outcomes = match options.workers {
        Some(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            pool.install(|| sources.par_iter().map(process).collect())
        }
        None => sources.par_iter().map(process).collect(),
    };

    Ok(BatchReport { outcomes })
}

// =============================================================================
// Tests
// =============================================================================
