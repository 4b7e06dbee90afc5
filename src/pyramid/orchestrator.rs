//! Per-image pyramid generation.
//!
//! Sequences the full pipeline for one source image:
//!
//! ```text
//! Opened -> Planned -> Leveling (per level: resample -> tile) -> Descriptored -> Done
//!    |          |           |
//!    +----------+-----------+--> Failed
//! ```
//!
//! Levels are generated in descending index order, full resolution first, so
//! progress reporting leads with the most expensive level; the levels
//! themselves are independent, so the order matters only for that. Within a
//! level, tile encode tasks fan out on the rayon pool: each task reads the
//! shared raster and writes a distinct file path, so no synchronization is
//! needed beyond idempotent directory creation.
//!
//! Failure isolation: a per-tile failure is logged and its siblings still
//! complete, but the image is marked failed once the level finishes, and the
//! descriptor is never written for a failed image. Consumers treat a missing
//! descriptor as "no pyramid", so a partial tile directory left behind is
//! inert rather than corrupt.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::iter::{ParallelBridge, ParallelIterator};
use tracing::{debug, info, warn};

use crate::dzi::{self, DziDescriptor, TILE_SIZE};
use crate::error::{EncodeError, PyramidError};

use super::planner::{plan_levels, PyramidLevel, ZeroLevelPolicy};
use super::resampler::resample;
use super::source::SourceImage;
use super::tiler::{JpegTileEncoder, TileBounds, TileGrid, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Options & Report
// =============================================================================

/// Tunable settings for pyramid generation.
///
/// Tile size, overlap and tile format are fixed constants of the output
/// layout; everything configurable per run lives here.
#[derive(Debug, Clone)]
pub struct PyramidOptions {
    /// JPEG quality for tile encoding (1-100)
    pub jpeg_quality: u8,

    /// Maximum accepted source pixel count; `None` accepts any size
    pub max_pixels: Option<u64>,

    /// Handling of levels whose truncated dimension reaches zero
    pub zero_level_policy: ZeroLevelPolicy,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_pixels: None,
            zero_level_policy: ZeroLevelPolicy::default(),
        }
    }
}

/// Summary of one successfully generated pyramid.
#[derive(Debug, Clone)]
pub struct PyramidReport {
    /// Pyramid name (source file stem)
    pub name: String,

    /// Number of levels generated
    pub levels: usize,

    /// Total number of tile files written
    pub tiles_written: usize,

    /// Path of the descriptor document
    pub descriptor_path: PathBuf,
}

// =============================================================================
// Generation
// =============================================================================

/// Generate a complete DZI pyramid for the image at `source_path`.
///
/// Writes tiles under `<output_dir>/<name>_files/<level>/<col>_<row>.jpeg` and
/// the descriptor to `<output_dir>/<name>.dzi`. The descriptor is written
/// last: its presence marks the pyramid as complete and consumable.
///
/// # Errors
///
/// Returns [`PyramidError`] if the source cannot be decoded, a level cannot be
/// resampled, any tile of any level fails, or directory/descriptor writes
/// fail. The failure is confined to this image; partial output is left on
/// disk without a descriptor.
pub fn generate_pyramid(
    source_path: &Path,
    output_dir: &Path,
    options: &PyramidOptions,
) -> Result<PyramidReport, PyramidError> {
    // Opened
    let source = SourceImage::open(source_path, options.max_pixels)?;
    let name = source.name().to_string();

    info!(
        "Opened {} ({}x{} pixels)",
        source_path.display(),
        source.width(),
        source.height()
    );

    // Planned
    let levels = plan_levels(source.width(), source.height(), options.zero_level_policy);
    debug!("Planned {} levels for {}", levels.len(), name);

    let tiles_root = dzi::tiles_dir(output_dir, &name);
    fs::create_dir_all(&tiles_root)?;

    let encoder = JpegTileEncoder::new(options.jpeg_quality);
    let mut tiles_written = 0usize;

    // Leveling, full resolution first
    for level in levels.iter().rev() {
        tiles_written += generate_level(&source, level, &tiles_root, &encoder)?;
        info!("Generated tiles for zoom level {}", level.index);
    }

    // Descriptored
    let descriptor = DziDescriptor::for_source(source.width(), source.height());
    let descriptor_path = dzi::descriptor_path(output_dir, &name);
    fs::write(&descriptor_path, descriptor.to_xml())?;

    // Done
    info!(
        "Pyramid {} complete: {} levels, {} tiles",
        name,
        levels.len(),
        tiles_written
    );

    Ok(PyramidReport {
        name,
        levels: levels.len(),
        tiles_written,
        descriptor_path,
    })
}

/// Resample one level and write all of its tiles.
///
/// Returns the number of tiles written. Tile failures do not stop sibling
/// tiles; once the level is complete, any recorded failure fails the level
/// and with it the image.
fn generate_level(
    source: &SourceImage,
    level: &PyramidLevel,
    tiles_root: &Path,
    encoder: &JpegTileEncoder,
) -> Result<usize, PyramidError> {
    let raster = resample(source, level)?;

    // create_dir_all is idempotent: re-running over an existing tree is fine
    let level_dir = tiles_root.join(level.index.to_string());
    fs::create_dir_all(&level_dir)?;

    let outcomes: Vec<bool> = TileGrid::new(level.width, level.height, TILE_SIZE)
        .par_bridge()
        .map(
            |bounds| match write_tile(&raster, &bounds, tiles_root, level.index, encoder) {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        "Tile {}_{} of level {} failed: {}",
                        bounds.col, bounds.row, level.index, e
                    );
                    false
                }
            },
        )
        .collect();

    let failed = outcomes.iter().filter(|ok| !**ok).count();
    if failed > 0 {
        return Err(PyramidError::TileFailures {
            level: level.index,
            failed,
            total: outcomes.len(),
        });
    }

    Ok(outcomes.len())
}

/// Encode one tile and write it to its final path.
///
/// Each tile targets a distinct path, so concurrent writers never collide.
fn write_tile(
    raster: &image::RgbImage,
    bounds: &TileBounds,
    tiles_root: &Path,
    level_index: u32,
    encoder: &JpegTileEncoder,
) -> Result<(), EncodeError> {
    let data = encoder.encode(raster, bounds)?;
    let path = tiles_root.join(dzi::tile_relative_path(level_index, bounds.col, bounds.row));
    fs::write(path, &data)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
