//! # DZI Tiler
//!
//! A Deep Zoom Image (DZI) pyramid generator.
//!
//! This library converts large raster images into multi-resolution tile
//! pyramids consumable by zoomable-image viewers such as OpenSeadragon. For
//! each source image it produces a layered set of image levels from full
//! resolution down to the smallest level, each level cut into fixed-size JPEG
//! tiles, plus an XML descriptor from which a viewer can compute the tile file
//! for any (level, column, row).
//!
//! ## Output Layout
//!
//! ```text
//! <output>/<name>.dzi                        descriptor document
//! <output>/<name>_files/<level>/<col>_<row>.jpeg
//! ```
//!
//! Level 0 is the smallest level; the highest level index is the original
//! resolution. Tiles are 256x256 with no overlap, truncated at raster edges.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`pyramid`] - Level planning, resampling, tiling, and the per-image
//!   orchestrator
//! - [`dzi`] - DZI descriptor serialization and output path layout
//! - [`batch`] - Directory scanning and the parallel batch driver
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types for each pipeline layer
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dzi_tiler::{generate_pyramid, PyramidOptions};
//!
//! let options = PyramidOptions::default();
//! let report = generate_pyramid(
//!     Path::new("images/scan.png"),
//!     Path::new("deepzoom_output"),
//!     &options,
//! )?;
//!
//! println!("{}: {} tiles", report.name, report.tiles_written);
//! # Ok::<(), dzi_tiler::PyramidError>(())
//! ```

pub mod batch;
pub mod config;
pub mod dzi;
pub mod error;
pub mod pyramid;

// Re-export commonly used types
pub use batch::{
    is_supported_image, run_batch, BatchOptions, BatchReport, BatchSummary, ImageOutcome,
    SUPPORTED_EXTENSIONS,
};
pub use config::Config;
pub use dzi::{
    descriptor_path, tile_relative_path, tiles_dir, DziDescriptor, DEEPZOOM_NAMESPACE,
    TILE_FORMAT, TILE_OVERLAP, TILE_SIZE,
};
pub use error::{BatchError, DecodeError, EncodeError, PyramidError, ResampleError};
pub use pyramid::{
    generate_pyramid, level_dimensions, max_level, plan_levels, resample, JpegTileEncoder,
    PyramidLevel, PyramidOptions, PyramidReport, SourceImage, TileBounds, TileGrid,
    ZeroLevelPolicy, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
