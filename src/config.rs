//! Configuration for the DZI tiler.
//!
//! This module provides the command-line and environment configuration:
//! - Command-line arguments via clap
//! - Environment variables with `DZI_` prefix
//! - Sensible defaults for all optional settings
//!
//! Tile size, overlap and tile format are fixed constants of the DZI output
//! layout (see [`crate::dzi`]); they are deliberately not configurable here.
//!
//! # Environment Variables
//!
//! - `DZI_OUTPUT_DIR` - Output root for generated pyramids (default: deepzoom_output)
//! - `DZI_JPEG_QUALITY` - JPEG quality for tile encoding (default: 80)
//! - `DZI_WORKERS` - Worker thread count (default: number of CPUs)
//! - `DZI_MAX_PIXELS` - Maximum accepted source pixel count (default: unlimited)
//! - `DZI_CLAMP_SMALL_LEVELS` - Keep zero-sized levels at 1 pixel instead of skipping

use clap::Parser;
use std::path::PathBuf;

use crate::batch::BatchOptions;
use crate::pyramid::{PyramidOptions, ZeroLevelPolicy, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Default Values
// =============================================================================

/// Default output root directory.
pub const DEFAULT_OUTPUT_DIR: &str = "deepzoom_output";

// =============================================================================
// CLI Arguments
// =============================================================================

/// DZI Tiler - a Deep Zoom Image pyramid generator.
///
/// Converts every supported raster image in a source directory into a
/// multi-resolution tile pyramid plus a DZI descriptor, laid out for
/// OpenSeadragon and other Deep Zoom viewers.
#[derive(Parser, Debug, Clone)]
#[command(name = "dzi-tiler")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory containing the source images to tile.
    pub input_dir: PathBuf,

    /// Directory to write the generated pyramids into.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, env = "DZI_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// JPEG quality for tile encoding (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "DZI_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Number of worker threads for the batch.
    ///
    /// Defaults to one worker per CPU.
    #[arg(long, env = "DZI_WORKERS")]
    pub workers: Option<usize>,

    /// Maximum number of pixels accepted from a source image.
    ///
    /// When unset, arbitrarily large images are accepted.
    #[arg(long, env = "DZI_MAX_PIXELS")]
    pub max_pixels: Option<u64>,

    /// Clamp pyramid levels whose computed width or height truncates to zero
    /// to 1 pixel instead of skipping them.
    #[arg(long, default_value_t = false, env = "DZI_CLAMP_SMALL_LEVELS")]
    pub clamp_small_levels: bool,

    /// Print the final batch summary as JSON on stdout.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        if self.workers == Some(0) {
            return Err("workers must be greater than 0".to_string());
        }

        if self.max_pixels == Some(0) {
            return Err("max_pixels must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Per-image generation settings derived from this configuration.
    pub fn pyramid_options(&self) -> PyramidOptions {
        PyramidOptions {
            jpeg_quality: self.jpeg_quality,
            max_pixels: self.max_pixels,
            zero_level_policy: if self.clamp_small_levels {
                ZeroLevelPolicy::ClampToOne
            } else {
                ZeroLevelPolicy::Skip
            },
        }
    }

    /// Batch settings derived from this configuration.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            pyramid: self.pyramid_options(),
            workers: self.workers,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
